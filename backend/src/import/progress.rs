use std::io::{self, Write};

/// Width of each progress bar in cells.
pub const BAR_WIDTH: usize = 30;

/// Lines rewritten on every repaint: status, rows bar, bytes bar.
const REPAINT_LINES: usize = 3;

/// Digits per group in formatted counters.
const GROUP_LENGTH: usize = 3;

const FILLED_CELL: char = '█';
const EMPTY_CELL: char = '░';

const HIDE_CURSOR: &str = "\x1b[?25l";
const SHOW_CURSOR: &str = "\x1b[?25h";
const ERASE_TO_EOL: &str = "\x1b[K";

/// Severity of the status line shown above the bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Debug,
    Info,
    Warn,
    Error,
}

impl MessageKind {
    fn label(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

/// Counters and totals of one running import.
///
/// Totals are fixed at construction, before the first render. Both
/// counters are monotonically non-decreasing and never exceed their
/// totals.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressState {
    bytes_loaded: u64,
    total_bytes: u64,
    rows_loaded: u64,
    total_rows: u64,
    message: String,
    message_kind: MessageKind,
}

impl ProgressState {
    pub fn new(total_bytes: u64, total_rows: u64) -> Self {
        Self {
            bytes_loaded: 0,
            total_bytes,
            rows_loaded: 0,
            total_rows,
            message: String::new(),
            message_kind: MessageKind::Info,
        }
    }

    pub fn update_bytes(&mut self, loaded: u64) {
        self.bytes_loaded = self.bytes_loaded.max(loaded.min(self.total_bytes));
    }

    pub fn update_rows(&mut self, loaded: u64) {
        self.rows_loaded = self.rows_loaded.max(loaded.min(self.total_rows));
    }

    pub fn set_message(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.message_kind = kind;
        self.message = text.into();
    }

    pub fn bytes_loaded(&self) -> u64 {
        self.bytes_loaded
    }

    pub fn rows_loaded(&self) -> u64 {
        self.rows_loaded
    }
}

/// Render a proportional bar of [`BAR_WIDTH`] cells. Pure: the same
/// `loaded`/`total` always yields the same bar. A zero total renders an
/// empty bar.
pub fn render_bar(loaded: u64, total: u64) -> String {
    let filled = if total == 0 {
        0
    } else {
        ((loaded as f64 / total as f64) * BAR_WIDTH as f64).floor() as usize
    };
    let filled = filled.min(BAR_WIDTH);

    let mut bar = String::with_capacity(BAR_WIDTH + 2);
    bar.push('[');
    for _ in 0..filled {
        bar.push(FILLED_CELL);
    }
    for _ in filled..BAR_WIDTH {
        bar.push(EMPTY_CELL);
    }
    bar.push(']');
    bar
}

/// Group digits in threes from the least-significant end, separated by a
/// space: `1234567` → `"1 234 567"`.
pub fn format_int(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / GROUP_LENGTH);
    let lead = digits.len() % GROUP_LENGTH;
    for (index, ch) in digits.chars().enumerate() {
        if index != 0 && index % GROUP_LENGTH == lead % GROUP_LENGTH {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped
}

/// The three terminal lines for a state. Pure function of the state.
pub fn render_lines(state: &ProgressState) -> [String; 3] {
    [
        format!("{} {}", state.message_kind.label(), state.message),
        format!(
            "{} Loaded {} rows of {}.",
            render_bar(state.rows_loaded, state.total_rows),
            format_int(state.rows_loaded),
            format_int(state.total_rows),
        ),
        format!(
            "{} Loaded {} bytes of {}.",
            render_bar(state.bytes_loaded, state.total_bytes),
            format_int(state.bytes_loaded),
            format_int(state.total_bytes),
        ),
    ]
}

/// Terminal progress reporter: holds the state and repaints all three
/// lines in place on every update. Presentation only; write errors are
/// swallowed and can never fail the import.
pub struct ImportProgress {
    state: ProgressState,
    painted: bool,
}

impl ImportProgress {
    /// Totals are supplied exactly once, before the first render.
    pub fn new(total_bytes: u64, total_rows: u64) -> Self {
        Self { state: ProgressState::new(total_bytes, total_rows), painted: false }
    }

    pub fn update_bytes(&mut self, loaded: u64) {
        self.state.update_bytes(loaded);
        self.repaint();
    }

    pub fn update_rows(&mut self, loaded: u64) {
        self.state.update_rows(loaded);
        self.repaint();
    }

    pub fn set_message(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.state.set_message(kind, text);
        self.repaint();
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    fn repaint(&mut self) {
        let lines = render_lines(&self.state);
        let mut out = io::stdout().lock();
        let _ = self.write_frame(&mut out, &lines);
        self.painted = true;
    }

    fn write_frame(&self, out: &mut impl Write, lines: &[String; 3]) -> io::Result<()> {
        if self.painted {
            write!(out, "\x1b[{REPAINT_LINES}A")?;
        }
        for line in lines {
            write!(out, "\r{line}{ERASE_TO_EOL}\n")?;
        }
        out.flush()
    }
}

/// Hides the terminal cursor for the duration of the import; restores it
/// on drop, on every exit path.
pub struct CursorGuard;

impl CursorGuard {
    pub fn hide() -> Self {
        let mut out = io::stdout().lock();
        let _ = out.write_all(HIDE_CURSOR.as_bytes());
        let _ = out.flush();
        Self
    }
}

impl Drop for CursorGuard {
    fn drop(&mut self) {
        let mut out = io::stdout().lock();
        let _ = out.write_all(SHOW_CURSOR.as_bytes());
        let _ = out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_int_groups_by_three() {
        assert_eq!(format_int(0), "0");
        assert_eq!(format_int(999), "999");
        assert_eq!(format_int(1000), "1 000");
        assert_eq!(format_int(12345), "12 345");
        assert_eq!(format_int(1234567), "1 234 567");
    }

    #[test]
    fn bar_is_proportional() {
        assert_eq!(render_bar(0, 100), format!("[{}]", "░".repeat(30)));
        assert_eq!(render_bar(100, 100), format!("[{}]", "█".repeat(30)));

        let half = render_bar(50, 100);
        assert_eq!(half.chars().filter(|&c| c == FILLED_CELL).count(), 15);
        assert_eq!(half.chars().filter(|&c| c == EMPTY_CELL).count(), 15);
    }

    #[test]
    fn zero_total_renders_empty_bar() {
        assert_eq!(render_bar(0, 0), format!("[{}]", "░".repeat(30)));
    }

    #[test]
    fn counters_are_monotonic_and_clamped() {
        let mut state = ProgressState::new(1000, 10);

        state.update_bytes(400);
        state.update_bytes(200);
        assert_eq!(state.bytes_loaded(), 400);

        state.update_bytes(5000);
        assert_eq!(state.bytes_loaded(), 1000);

        state.update_rows(12);
        assert_eq!(state.rows_loaded(), 10);
    }

    #[test]
    fn rendering_is_idempotent() {
        let mut state = ProgressState::new(2048, 16);
        state.update_bytes(1024);
        state.update_rows(8);
        state.set_message(MessageKind::Warn, "row 3 skipped");

        assert_eq!(render_lines(&state), render_lines(&state.clone()));
    }

    #[test]
    fn render_lines_include_counts_and_kind() {
        let mut state = ProgressState::new(2048, 1500);
        state.update_bytes(2048);
        state.update_rows(1500);
        state.set_message(MessageKind::Info, "done");

        let [status, rows, bytes] = render_lines(&state);
        assert_eq!(status, "INFO done");
        assert!(rows.contains("1 500 rows of 1 500."));
        assert!(bytes.contains("2 048 bytes of 2 048."));
        assert!(rows.starts_with(&format!("[{}]", "█".repeat(30))));
    }
}
