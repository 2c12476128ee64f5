//! `demo`: a static form screen with one text box.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin demo
//! cargo run --bin demo -- --width 30 --max-length 60
//! cargo run --bin demo -- --headless --type "hello world"
//! ```
//!
//! Type into the query box and press Enter to accept, or Ctrl+C to cancel.

use std::ffi::OsString;
use std::time::Duration;
use termline::{
    CellBuffer, CellStyle, CodepointView, Color, FontWeight, KeyCode, KeyEvent, KeyReader,
    LogLevel, Outcome, Result, Terminal, TerminalOptions, TextBox, TextBoxOptions,
    TextDecoration, set_event_callback, set_log_callback,
};

// ============================================================================
// CLI Parsing
// ============================================================================

const HELP_TEXT: &str = "demo - termline form demonstration

USAGE:
    demo [OPTIONS]

OPTIONS:
    -h, --help              Print this help message and exit
    --width <N>             Text box width in cells (default: 22)
    --max-length <N>        Text box capacity in codepoints (default: 22)

    --headless              Draw into an in-memory 80x24 buffer and print it
    --type <TEXT>           Keys to type in headless mode before Enter

EXAMPLES:
    demo                                 # Interactive mode
    demo --width 10 --max-length 40      # Narrow, scrolling box
    demo --headless --type 'MAD LON'     # CI smoke test
";

/// Application configuration parsed from command-line arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub box_width: u16,
    pub max_length: usize,
    pub headless: bool,
    pub typed: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            box_width: 22,
            max_length: 22,
            headless: false,
            typed: String::new(),
        }
    }
}

/// Result of CLI parsing.
pub enum ParseResult {
    Config(Config),
    Help,
    Error(String),
}

impl Config {
    /// Parse configuration from command-line arguments.
    pub fn from_args<I>(args: I) -> ParseResult
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        // Skip program name
        args.next();

        while let Some(arg) = args.next() {
            match arg.to_string_lossy().as_ref() {
                "-h" | "--help" => return ParseResult::Help,

                "--width" => match positive_value(args.next(), "--width") {
                    Ok(n) => config.box_width = n,
                    Err(msg) => return ParseResult::Error(msg),
                },

                "--max-length" => match positive_value(args.next(), "--max-length") {
                    Ok(n) => config.max_length = n,
                    Err(msg) => return ParseResult::Error(msg),
                },

                "--headless" => config.headless = true,

                "--type" => match args.next() {
                    Some(v) => config.typed = v.to_string_lossy().into_owned(),
                    None => return ParseResult::Error("--type requires a value".to_string()),
                },

                other => return ParseResult::Error(format!("Unknown option: {other}")),
            }
        }

        ParseResult::Config(config)
    }

    fn textbox_options(&self) -> TextBoxOptions {
        let style = CellStyle::colors(Color::Black, Color::Cyan)
            .with_decoration(TextDecoration::Underline);
        TextBoxOptions::new(QUERY_BOX_X, QUERY_ROW)
            .with_display_width(self.box_width)
            .with_max_codepoints(self.max_length)
            .with_style(style)
    }
}

fn positive_value<T: std::str::FromStr + Default + PartialEq>(
    value: Option<OsString>,
    flag: &str,
) -> std::result::Result<T, String> {
    let Some(value) = value else {
        return Err(format!("{flag} requires a value"));
    };
    let value = value.to_string_lossy();
    match value.parse::<T>() {
        Ok(n) if n != T::default() => Ok(n),
        _ => Err(format!("Invalid {flag} value: {value} (must be positive integer)")),
    }
}

// ============================================================================
// Form
// ============================================================================

const QUERY_LABEL: &str = "Query";
const QUERY_ROW: u16 = 14;
const QUERY_BOX_X: u16 = QUERY_LABEL.len() as u16 + 2;

const INSPECTOR: &str = "  ID  SERVICE          STATE     UPTIME   OWNER
  1   ingest-gateway   running   41d      platform
  2   billing-worker   degraded  3h       payments
  3   search-indexer   stopped   -        search
\tqueue depth\t\t1,204
\tlast error\t\tconnection reset by peer
\tnext check\t\t18:08";

/// Draw everything except the text box.
fn draw_form(screen: &mut CellBuffer) -> Result<()> {
    let width = screen.width();
    let height = screen.height();

    // Title bar
    screen.write_at(
        0,
        0,
        CodepointView::new("Service Monitor"),
        CellStyle::from(FontWeight::Bold),
    )?;
    screen.write_at_unstyled(18, 0, CodepointView::new("- Overview"))?;

    // Menu bar: hotkeys underlined, the current tab bold.
    let menu = CellStyle::NONE.with_foreground(Color::Cyan);
    screen.write_at(
        0,
        1,
        CodepointView::new("F1 Services    F2 Changes    F3 Inspector    F4 Alerts"),
        menu,
    )?;
    for x in [0, 1, 15, 16, 29, 30, 45, 46] {
        screen.set_cell_style(x, 1, menu.with_decoration(TextDecoration::Underline))?;
    }
    screen.set_block_style(32, 1, 40, 1, menu.with_weight(FontWeight::Bold))?;

    // Inspector
    screen.write_block_at(1, 3, CodepointView::new(INSPECTOR))?;
    let highlight = CellStyle::from(FontWeight::Bold).with_foreground(Color::Green);
    screen.set_block_style(1, 3, width - 2, 3, highlight)?;
    screen.set_block_style(24, 5, 31, 5, highlight.with_foreground(Color::Yellow))?;
    screen.set_block_style(24, 6, 30, 6, highlight.with_foreground(Color::Red))?;

    // Status bar, cut to fit.
    let status = CodepointView::new(
        "Online    localhost    3 services    1 degraded    1 stopped    Last check 17:08    No changes",
    );
    screen.write_at_unstyled(1, height - 1, status.substr(0, usize::from(width - 1))?)?;

    screen.write_at_unstyled(0, QUERY_ROW, CodepointView::new(QUERY_LABEL))
}

// ============================================================================
// Modes
// ============================================================================

fn run_headless(config: &Config) -> Result<()> {
    set_event_callback(|name, data| eprintln!("event {name}: {data:?}"));

    let mut screen = CellBuffer::new(80, 24);
    draw_form(&mut screen)?;

    let content = {
        let mut input = TextBox::new(&mut screen, config.textbox_options())?;
        input.set_focus(true)?;
        for ch in config.typed.chars() {
            input.accept_key_event(&KeyEvent::char(ch))?;
        }
        input.accept_key_event(&KeyEvent::key(KeyCode::Enter))?;
        input.content().to_codepoint_string()
    };

    for y in 0..screen.height() {
        println!("{}", screen.row_text(y).trim_end());
    }
    println!("accepted: {content}");
    Ok(())
}

fn run_interactive(config: &Config) -> Result<()> {
    let mut terminal = Terminal::stdout(TerminalOptions::default());
    terminal.setup()?;
    draw_form(terminal.buffer_mut())?;
    terminal.present()?;

    let mut keys = KeyReader::stdin();
    let (outcome, content) = {
        let mut input = TextBox::new(&mut terminal, config.textbox_options())?;
        input.set_focus(true)?;
        let outcome = input.run(&mut keys, Duration::from_secs(5), KeyEvent::is_ctrl_c)?;
        (outcome, input.content().to_codepoint_string())
    };
    terminal.restore()?;

    match outcome {
        Outcome::Accepted => println!("accepted: {content}"),
        Outcome::Cancelled => println!("cancelled"),
    }
    Ok(())
}

fn main() -> Result<()> {
    set_log_callback(|level, message| {
        if level >= LogLevel::Warn {
            eprintln!("[{level:?}] {message}");
        }
    });

    match Config::from_args(std::env::args_os()) {
        ParseResult::Config(config) => {
            if config.headless {
                run_headless(&config)
            } else {
                run_interactive(&config)
            }
        }
        ParseResult::Help => {
            print!("{HELP_TEXT}");
            Ok(())
        }
        ParseResult::Error(msg) => {
            eprintln!("Error: {msg}");
            eprintln!("Run with --help for usage information.");
            std::process::exit(1);
        }
    }
}
