//! Terminal output for vnode.
//!
//! Status lines go through the `print_*` helpers; `list` and `ls-remote` rows
//! are rendered by [`installed_line`] and [`remote_line`]. Colors are applied
//! only when the target stream supports them.

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

use vnode_lib::listing::{InstalledRow, RemoteRow};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ACTIVE: &str = "→";
}

#[derive(Debug, Clone, Copy)]
enum Tone {
  Good,
  Bad,
  Warn,
  Note,
  Accent,
  Faint,
}

fn paint(text: &str, stream: Stream, tone: Tone) -> String {
  text
    .if_supports_color(stream, |s| match tone {
      Tone::Good => s.green().to_string(),
      Tone::Bad => s.red().to_string(),
      Tone::Warn => s.yellow().to_string(),
      Tone::Note => s.blue().to_string(),
      Tone::Accent => s.cyan().to_string(),
      Tone::Faint => s.dimmed().to_string(),
    })
    .to_string()
}

pub fn print_success(message: &str) {
  println!("{} {}", paint(symbols::SUCCESS, Stream::Stdout, Tone::Good), message);
}

pub fn print_info(message: &str) {
  println!("{} {}", paint(symbols::INFO, Stream::Stdout, Tone::Note), message);
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    paint(symbols::ERROR, Stream::Stderr, Tone::Bad),
    paint(message, Stream::Stderr, Tone::Bad)
  );
}

pub fn print_warning(message: &str) {
  eprintln!(
    "{} {}",
    paint(symbols::WARNING, Stream::Stderr, Tone::Warn),
    paint(message, Stream::Stderr, Tone::Warn)
  );
}

/// Indented `label: value` line under a status message.
pub fn print_stat(label: &str, value: &str) {
  println!("  {}: {}", paint(label, Stream::Stdout, Tone::Faint), value);
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

/// Archive size in binary units, one decimal above bytes.
pub fn format_bytes(bytes: u64) -> String {
  const UNITS: [&str; 3] = ["KB", "MB", "GB"];

  if bytes < 1024 {
    return format!("{} B", bytes);
  }
  let mut size = bytes as f64 / 1024.0;
  let mut unit = 0;
  while size >= 1024.0 && unit + 1 < UNITS.len() {
    size /= 1024.0;
    unit += 1;
  }
  format!("{:.1} {}", size, UNITS[unit])
}

/// One `list` row: `→ v20.11.1 [LTS] (active)`.
pub fn installed_line(row: &InstalledRow) -> String {
  let marker = if row.active { symbols::ACTIVE } else { " " };
  let mut line = format!("{} {}", marker, row.version);
  if row.lts == Some(true) {
    line.push_str(" [LTS]");
  }

  if row.active {
    format!(
      "{} {}",
      paint(&line, Stream::Stdout, Tone::Good),
      paint("(active)", Stream::Stdout, Tone::Faint)
    )
  } else {
    line
  }
}

/// One `ls-remote` row: version, release date, then its annotations.
pub fn remote_line(row: &RemoteRow) -> String {
  let mut line = format!("{:<12} {}", row.version.as_str(), row.date);

  let lts = row.lts.then(|| match &row.codename {
    Some(codename) => format!("[LTS: {}]", codename),
    None => "[LTS]".to_string(),
  });
  let tags = [
    (lts, Tone::Good),
    (row.recent.then(|| "[recent]".to_string()), Tone::Accent),
    (row.security.then(|| "[security]".to_string()), Tone::Bad),
    (row.installed.then(|| "(installed)".to_string()), Tone::Faint),
  ];
  for (tag, tone) in tags {
    if let Some(tag) = tag {
      line.push(' ');
      line.push_str(&paint(&tag, Stream::Stdout, tone));
    }
  }

  line
}
