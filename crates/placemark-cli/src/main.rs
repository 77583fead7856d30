mod highlight;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use highlight::{Mark, block_ranges, line_runs};
use placemark_config::Config;
use placemark_engine::{
    Document, ParseOptions, parse_with,
    parsing::{cursor::SourceLines, snapshot::outline},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::{io::stdout, path::PathBuf, process};

#[derive(Debug, Parser)]
#[command(name = "placemark-cli")]
#[command(about = "Show where every piece of Markdown syntax sits in its source", long_about = None)]
struct Args {
    /// Print the placement outline instead of opening the viewer
    #[arg(long, conflicts_with = "json")]
    dump: bool,

    /// Print the parsed document as JSON
    #[arg(long)]
    json: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Markdown file to parse
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

fn parse_options(config: &Config) -> ParseOptions {
    ParseOptions {
        tab_size: config.tab_size,
        indented_code: config.indented_code,
    }
}

struct App {
    path: PathBuf,
    document: Document,
    block_state: ListState,
}

impl App {
    fn new(path: PathBuf, document: Document) -> Self {
        let mut block_state = ListState::default();
        if !document.blocks.is_empty() {
            block_state.select(Some(0));
        }
        Self {
            path,
            document,
            block_state,
        }
    }

    fn next_block(&mut self) {
        if self.document.blocks.is_empty() {
            return;
        }
        let i = match self.block_state.selected() {
            Some(i) => (i + 1) % self.document.blocks.len(),
            None => 0,
        };
        self.block_state.select(Some(i));
    }

    fn previous_block(&mut self) {
        if self.document.blocks.is_empty() {
            return;
        }
        let i = match self.block_state.selected() {
            Some(0) | None => self.document.blocks.len() - 1,
            Some(i) => i - 1,
        };
        self.block_state.select(Some(i));
    }

    /// First source row of the selected block.
    fn selected_row(&self) -> usize {
        self.block_state
            .selected()
            .and_then(|i| self.document.block_at(i))
            .and_then(|block| block.placement().extent())
            .map_or(0, |extent| extent.start.row)
    }

    fn source_lines(&self) -> Vec<Line<'static>> {
        let ranges = self
            .block_state
            .selected()
            .and_then(|i| self.document.block_at(i))
            .map(block_ranges)
            .unwrap_or_default();
        let lines = SourceLines::new(&self.document.source_text);
        (0..lines.len())
            .filter_map(|row| lines.get(row).map(|line| (row, line.text)))
            .map(|(row, text)| {
                let spans: Vec<Span> = line_runs(text, row, &ranges)
                    .into_iter()
                    .map(|(run, mark)| Span::styled(run, mark_style(mark)))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

fn mark_style(mark: Mark) -> Style {
    match mark {
        Mark::None => Style::default(),
        Mark::Body => Style::default().fg(Color::Cyan),
        Mark::Markup => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let args = Args::parse();

    let config = match Config::load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Config file location: {}", Config::config_path().display());
            process::exit(1);
        }
    };

    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let document = parse_with(&text, &parse_options(&config), &config.links)
        .with_context(|| format!("parsing {}", args.file.display()))?;
    log::info!(
        "parsed {} blocks with {} errors from {}",
        document.blocks.len(),
        document.errors.len(),
        args.file.display()
    );

    if args.dump {
        print!("{}", outline(&document));
    } else if args.json {
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        view(App::new(args.file, document))?;
    }
    Ok(())
}

fn view(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_block(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_block(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(rows[0]);

    // Block list panel
    let block_items: Vec<ListItem> = app
        .document
        .blocks
        .iter()
        .map(|block| {
            let row = block
                .placement()
                .extent()
                .map_or(0, |extent| extent.start.row + 1);
            let preview: String = placemark_engine::plain_text(
                &block.inlines().cloned().collect::<Vec<_>>(),
            )
            .chars()
            .take(24)
            .collect();
            let display_text = format!("{row:>4} {} {preview}", block.kind_name());
            ListItem::new(vec![Line::from(vec![Span::raw(display_text)])])
        })
        .collect();

    let title = format!("Blocks: {}", app.path.display());
    let blocks_list = List::new(block_items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(blocks_list, chunks[0], &mut app.block_state);

    // Source panel, scrolled to the selected block
    let scroll = app.selected_row().saturating_sub(2);
    let source = Paragraph::new(app.source_lines())
        .block(Block::default().borders(Borders::ALL).title("Source"))
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));

    f.render_widget(source, chunks[1]);

    // Instructions and syntax errors
    let mut help_spans = vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous | "),
        Span::raw("↓/j: Next | "),
        Span::styled("markup", mark_style(Mark::Markup)),
        Span::raw(" "),
        Span::styled("body", mark_style(Mark::Body)),
    ];
    if let Some(error) = app.document.errors.first() {
        help_spans.push(Span::styled(
            format!(" | {} error(s), first: {error}", app.document.errors.len()),
            Style::default().fg(Color::Red),
        ));
    }
    let help = Paragraph::new(vec![Line::from(help_spans)]).block(Block::default());

    f.render_widget(help, rows[1]);
}
