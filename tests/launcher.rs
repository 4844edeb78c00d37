//! End-to-end launcher scenarios driven through the public API.

use zofi::app::{Command, Query};
use zofi::ui::UnicodeMeasure;
use zofi::{
    handle_event, Action, App, Corpus, Event, KeyEvent, KeySym, LaunchMode, LayoutOptions,
    Renderer, Session, Theme,
};

fn commands(items: &[&str]) -> Session {
    let corpus = Corpus::Commands(items.iter().map(ToString::to_string).collect());
    Session::with_corpus(LaunchMode::Run, corpus, false)
}

fn press(session: &mut Session, sym: KeySym) -> (bool, Vec<Action>) {
    handle_event(session, &Event::Key(KeyEvent::new(sym))).unwrap()
}

fn type_text(session: &mut Session, text: &str) {
    for ch in text.chars() {
        press(session, KeySym::Char(ch));
    }
}

fn visible(session: &Session) -> Vec<String> {
    session.page().map(ToString::to_string).collect()
}

fn plain_renderer() -> Renderer {
    Renderer::new(
        LayoutOptions {
            prompt: "> ".into(),
            ..LayoutOptions::default()
        },
        Theme::default(),
        Box::new(UnicodeMeasure),
        false,
        0,
    )
}

#[test]
fn reset_twice_equals_reset_once() {
    let mut s = commands(&["a", "b", "c", "d", "e"]);
    s.record_page_size(2);
    press(&mut s, KeySym::Down);
    press(&mut s, KeySym::Down);
    press(&mut s, KeySym::Down);

    press(&mut s, KeySym::Home);
    let once = *s.pager();
    press(&mut s, KeySym::Home);
    assert_eq!(*s.pager(), once);
    assert_eq!(once.selection(), 0);
    assert_eq!(once.first_result(), 0);
}

#[test]
fn typing_then_erasing_empties_the_query() {
    let mut s = commands(&["alpha"]);
    type_text(&mut s, "héllo wörld");
    assert_eq!(s.query().as_str(), "héllo wörld");

    for _ in 0.."héllo wörld".chars().count() {
        press(&mut s, KeySym::Backspace);
    }
    assert!(s.query().is_empty());
    assert!(s.query().as_bytes().is_empty());
    assert_eq!(s.results().len(), 1);
}

#[test]
fn three_byte_codepoint_round_trips() {
    let mut q = Query::new();
    q.insert('a');
    let before = q.as_bytes().to_vec();

    q.insert('€');
    assert_eq!(q.byte_len(), before.len() + 3);
    q.delete_last();
    assert_eq!(q.as_bytes(), before.as_slice());
}

#[test]
fn full_page_advances_wrap_through_every_offset() {
    let mut s = commands(&["0", "1", "2", "3", "4", "5", "6"]);
    s.record_page_size(3);

    let mut visited = vec![s.pager().first_result()];
    for _ in 0..7 {
        for _ in 0..3 {
            s.apply(Command::SelectNext);
        }
        visited.push(s.pager().first_result());
    }
    assert_eq!(visited, vec![0, 3, 6, 2, 5, 1, 4, 0]);
}

#[test]
fn previous_on_first_entry_is_noop() {
    let mut s = commands(&["a", "b", "c"]);
    s.record_page_size(3);
    let before = *s.pager();
    press(&mut s, KeySym::Up);
    assert_eq!(*s.pager(), before);
}

#[test]
fn substring_query_pages_through_matches() {
    let mut s = commands(&["abc", "xab", "zzz"]);
    type_text(&mut s, "ab");
    assert_eq!(visible(&s), vec!["abc", "xab"]);

    s.record_page_size(2);
    press(&mut s, KeySym::Down);
    assert_eq!(s.pager().selection(), 1);
    press(&mut s, KeySym::Down);
    assert_eq!(s.pager().selection(), 0);
    assert_eq!(s.pager().first_result(), 0);
}

#[test]
fn unbounded_render_fills_the_clip_area() {
    let items: Vec<String> = (0..10).map(|i| format!("entry{i}")).collect();
    let mut s = Session::with_corpus(LaunchMode::Run, Corpus::Commands(items), false);

    // One row for the input line, four for results.
    plain_renderer().render(&mut s, 5, 40);
    assert_eq!(s.pager().num_results_drawn(), 4);
}

#[test]
fn selection_stays_in_bounds_under_mixed_input() {
    let items: Vec<String> = (0..23).map(|i| format!("item{i:02}")).collect();
    let mut s = Session::with_corpus(LaunchMode::Run, Corpus::Commands(items), false);
    let mut renderer = plain_renderer();

    let script = [
        KeyEvent::new(KeySym::Down),
        KeyEvent::new(KeySym::Tab),
        KeyEvent::new(KeySym::Char('1')),
        KeyEvent::new(KeySym::Down),
        KeyEvent::new(KeySym::Down),
        KeyEvent::new(KeySym::Down),
        KeyEvent::new(KeySym::Up),
        KeyEvent::new(KeySym::Backspace),
        KeyEvent::ctrl('j'),
        KeyEvent::ctrl('j'),
        KeyEvent::ctrl('k'),
        KeyEvent::new(KeySym::BackTab),
        KeyEvent::new(KeySym::Char('z')),
        KeyEvent::new(KeySym::Down),
        KeyEvent::ctrl('u'),
        KeyEvent::new(KeySym::Right),
        KeyEvent::new(KeySym::Left),
        KeyEvent::new(KeySym::Home),
    ];

    for (step, key) in script.iter().cycle().take(script.len() * 6).enumerate() {
        handle_event(&mut s, &Event::Key(*key)).unwrap();
        // Vary the pane so page sizes change between steps.
        let rows = 3 + step % 5;
        renderer.render(&mut s, rows, 30);

        let pager = s.pager();
        let count = s.results().len();
        assert!(pager.selection() < pager.selectable(count), "step {step}: {pager:?}");
        if count > 0 {
            assert!(pager.first_result() < count, "step {step}: {pager:?}");
        }
    }
}

#[test]
fn run_mode_scan_then_launch() {
    let mut s = Session::new(LaunchMode::Run, false);
    let paths = vec![
        "/usr/bin/htop".to_string(),
        "/usr/bin/vim".into(),
        "/usr/local/bin/vim".into(),
    ];
    let (render, _) = handle_event(&mut s, &Event::CommandsScanned { paths }).unwrap();
    assert!(render);
    assert_eq!(s.corpus().len(), 2);

    type_text(&mut s, "vi");
    let (_, actions) = press(&mut s, KeySym::Enter);
    assert_eq!(actions, vec![Action::Launch { command: "vim".into() }]);
    assert!(s.is_submitted());

    // Finished sessions ignore further keys.
    assert_eq!(press(&mut s, KeySym::Char('x')), (false, vec![]));
}

#[test]
fn drun_mode_launches_exec_without_field_codes() {
    let mut s = Session::new(LaunchMode::Drun, true);
    let apps = vec![
        App::new("Firefox", "firefox %u"),
        App::new("Files", "nautilus --new-window %U"),
    ];
    handle_event(&mut s, &Event::CorpusLoaded(Corpus::Apps(apps))).unwrap();

    type_text(&mut s, "fls");
    let (_, actions) = press(&mut s, KeySym::Enter);
    assert_eq!(
        actions,
        vec![Action::Launch {
            command: "nautilus --new-window".into()
        }]
    );
}

#[test]
fn dmenu_mode_emits_the_selection() {
    let mut s = Session::new(LaunchMode::Dmenu, false);
    handle_event(
        &mut s,
        &Event::Piped {
            lines: vec!["red".into(), "green".into()],
        },
    )
    .unwrap();
    handle_event(
        &mut s,
        &Event::Piped {
            lines: vec!["blue".into()],
        },
    )
    .unwrap();
    assert_eq!(s.corpus().len(), 3);

    s.record_page_size(3);
    press(&mut s, KeySym::Down);
    press(&mut s, KeySym::Down);
    let (_, actions) = press(&mut s, KeySym::Enter);
    assert_eq!(actions, vec![Action::Emit { line: "blue".into() }]);
}

#[test]
fn escape_closes_without_output() {
    let mut s = commands(&["a"]);
    let (render, actions) = press(&mut s, KeySym::Escape);
    assert!(!render);
    assert_eq!(actions, vec![Action::Close]);
    assert!(s.is_closed());
    assert!(!s.is_submitted());
}

#[test]
fn wrong_corpus_kind_is_rejected() {
    let mut s = Session::new(LaunchMode::Drun, false);
    let result = handle_event(&mut s, &Event::CommandsScanned { paths: vec!["/bin/ls".into()] });
    assert!(result.is_err());
    assert!(s.corpus().is_empty());
}
