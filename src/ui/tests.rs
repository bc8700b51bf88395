use super::*;
use crate::app::{Message, Model, update};
use crate::config::{RestoreSettings, Settings};
use crate::sidefiles::PriceConfig;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const LEADERBOARD: &str = "\
export const leaderboardData = [
  { rank: 1, name: \"Ada\", hours: 30, money: 10, profilePic: \"\" },
  { rank: 2, name: \"Grace\", hours: 20, money: 0, profilePic: grace },
];
";

const SLIDES: &str = "\
const slideshowImages = [
  {
    id: 1,
    url: \"/a.jpg\",
    title: \"Opening night\",
    description: \"Doors at six\",
  },
];
";

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(100, 30);
    Terminal::new(backend).unwrap()
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn draw(model: &Model) -> String {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    screen_text(&terminal)
}

fn settings_in(dir: &TempDir) -> Settings {
    Settings {
        leaderboard_file: dir.path().join("leaderboard-data.ts"),
        constants_file: dir.path().join("constants.ts"),
        git_repo_path: dir.path().to_path_buf(),
        date_file: dir.path().join("date.ts"),
        slideshow_file: Some(dir.path().join("ImageSlideshow.tsx")),
        source: PathBuf::from("boardedit.json"),
        ..Settings::default()
    }
}

fn leaderboard_model() -> (TempDir, Model) {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(&dir);
    fs::write(&settings.leaderboard_file, LEADERBOARD).unwrap();
    let prices = PriceConfig {
        pool_price: 5000,
        price_per_hour: 25,
        total_hours: 200,
    };
    fs::write(&settings.constants_file, prices.render()).unwrap();
    let model = Model::leaderboard(settings).unwrap();
    (dir, model)
}

#[test]
fn test_launcher_lists_all_tools() {
    let model = Model::launcher(Settings::default());
    let text = draw(&model);
    assert!(text.contains("1. Contestant Management"));
    assert!(text.contains("2. Event & News Update"));
    assert!(text.contains("3. Restore Repository"));
    assert!(text.contains("> 1."), "first entry is highlighted");
}

#[test]
fn test_launcher_highlight_follows_selection() {
    let model = update(Model::launcher(Settings::default()), Message::SelectNext);
    let text = draw(&model);
    assert!(text.contains("> 2. Event & News Update"));
}

#[test]
fn test_leaderboard_shows_records_and_prices() {
    let (_dir, model) = leaderboard_model();
    let text = draw(&model);
    assert!(text.contains("Leaderboard (2)"));
    assert!(text.contains("1 - Ada"));
    assert!(text.contains("2 - Grace"));
    assert!(text.contains("Pool Prize:"));
    assert!(text.contains("5000"));
    assert!(text.contains("New record"));
    assert!(text.contains("leaderboard-data.ts"));
}

#[test]
fn test_selecting_record_fills_form() {
    let (_dir, model) = leaderboard_model();
    let model = update(model, Message::SelectNext);
    let model = update(model, Message::SelectNext);
    let text = draw(&model);
    assert!(text.contains("Edit record"));
    assert!(text.contains("> 2 - Grace"));
    assert!(text.contains("grace"));
}

#[test]
fn test_delete_updates_list_and_shows_toast() {
    let (_dir, model) = leaderboard_model();
    let model = update(model, Message::SelectNext);
    let model = update(model, Message::DeleteRecord);
    // The delete toast replaces the status bar until it expires.
    let model = update(model, Message::Redraw);
    let text = draw(&model);
    assert!(text.contains("Leaderboard (1)"));
    assert!(text.contains("[info] Record deleted"));
}

#[test]
fn test_slides_screen_renders_slide_labels() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(&dir);
    let path = settings.slideshow_file.clone().unwrap();
    fs::write(&path, SLIDES).unwrap();
    let model = Model::slides(settings, &path).unwrap();
    let text = draw(&model);
    assert!(text.contains("Slides (1)"));
    assert!(text.contains("0: Opening night"));
    assert!(text.contains("Description:"));
}

#[test]
fn test_restore_screen_asks_for_confirmation() {
    let restore = RestoreSettings {
        folder: PathBuf::from("/srv/site"),
        repo_url: "https://example.com/site.git".to_string(),
    };
    let model = Model::restore(Settings::default(), restore);
    let text = draw(&model);
    assert!(text.contains("/srv/site"));
    assert!(text.contains("https://example.com/site.git"));
    assert!(!text.contains("Press Enter again"));

    let model = update(model, Message::ConfirmRestore);
    let text = draw(&model);
    assert!(text.contains("Press Enter again to confirm"));
}

#[test]
fn test_help_overlay_lists_editor_keys() {
    let (_dir, model) = leaderboard_model();
    let model = update(model, Message::ToggleHelp);
    let text = draw(&model);
    assert!(text.contains("Help"));
    assert!(text.contains("Commit and push"));
    assert!(!text.contains("Move slide up"));
}

#[test]
fn test_small_terminal_does_not_panic() {
    let (_dir, model) = leaderboard_model();
    let model = update(model, Message::FocusNext);
    let mut terminal = Terminal::new(TestBackend::new(20, 4)).unwrap();
    terminal.draw(|frame| render(&model, frame)).unwrap();
}
