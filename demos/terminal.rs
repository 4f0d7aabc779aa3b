use crossterm::event::{Event, KeyCode};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::text::Text;
use ratatui::widgets::{Block, Paragraph};
use ratatui::Terminal;

use treeprint::Tree;

fn tree() -> Tree<&'static str> {
    let mut tree = Tree::with_root("crates");
    let mut root = tree.root_mut();
    {
        let mut tui = root.append_branch_with_meta("0.26", "ratatui");
        tui.append_leaf("backend").append_leaf("widgets");
        tui.append_branch("text").append_leaf("Line").append_leaf("Span");
    }
    root.append_leaf_with_meta("0.27", "crossterm");
    root.append_leaf("treeprint\nrenders trees\nas text");
    tree
}

fn main() -> std::io::Result<()> {
    // Terminal initialization
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // App
    let res = run_app(&mut terminal, &tree());

    // restore terminal
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::terminal::LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, tree: &Tree<&str>) -> std::io::Result<()> {
    let text = Text::from(tree);
    loop {
        terminal.draw(|frame| {
            let area = frame.size();
            let paragraph = Paragraph::new(text.clone())
                .block(Block::bordered().title("treeprint (q to quit)"));
            frame.render_widget(paragraph, area);
        })?;

        if let Event::Key(key) = crossterm::event::read()? {
            if key.code == KeyCode::Char('q') {
                return Ok(());
            }
        }
    }
}
