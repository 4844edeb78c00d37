//! Key classification.
//!
//! A [`KeyEvent`] is a symbolic key plus modifier flags. [`classify`] walks the
//! static [`KEYMAP`] table in priority order and returns the [`Command`] of the
//! first rule with a matching trigger, so at most one command fires per key.
//!
//! | Priority | Trigger | Command |
//! |---------:|---------|---------|
//! | 1 | printable character | [`Command::Insert`] |
//! | 2 | `Backspace` | [`Command::DeleteLast`] |
//! | 3 | `Ctrl+W` | [`Command::DeleteWord`] |
//! | 4 | `Ctrl+U` | [`Command::Clear`] |
//! | 5 | `Up`, `Left`, `Shift+Tab`, `Ctrl+K` | [`Command::SelectPrevious`] |
//! | 6 | `Down`, `Right`, `Tab`, `Ctrl+J` | [`Command::SelectNext`] |
//! | 7 | `Home` | [`Command::Reset`] |
//! | 8 | `Esc`, `Ctrl+C` | [`Command::Close`] |
//! | 9 | `Enter` | [`Command::Submit`] |

use zellij_tile::prelude::{BareKey, KeyModifier, KeyWithModifier};

/// Symbolic meaning of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySym {
    Char(char),
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Tab,
    /// `Shift+Tab`.
    BackTab,
    Home,
    Escape,
    Enter,
    /// Any key without a meaning to the launcher.
    Other,
}

/// Active modifier flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

/// A key press as seen by the launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub sym: KeySym,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key press without modifiers.
    #[must_use]
    pub fn new(sym: KeySym) -> Self {
        Self {
            sym,
            modifiers: Modifiers::default(),
        }
    }

    /// `Ctrl` plus a letter key.
    #[must_use]
    pub fn ctrl(letter: char) -> Self {
        Self {
            sym: KeySym::Char(letter),
            modifiers: Modifiers {
                ctrl: true,
                ..Modifiers::default()
            },
        }
    }

    /// The character this key types, if it types one.
    ///
    /// `Ctrl` and `Alt` chords never type, and neither do control characters.
    #[must_use]
    pub fn printable(&self) -> Option<char> {
        match self.sym {
            KeySym::Char(c) if !self.modifiers.ctrl && !self.modifiers.alt && !c.is_control() => {
                Some(c)
            }
            _ => None,
        }
    }

    /// Whether this is `Ctrl` held with the given letter key, in either case.
    fn is_ctrl_chord(&self, letter: char) -> bool {
        self.modifiers.ctrl
            && matches!(self.sym, KeySym::Char(c) if c.eq_ignore_ascii_case(&letter))
    }
}

impl From<&KeyWithModifier> for KeyEvent {
    fn from(key: &KeyWithModifier) -> Self {
        let modifiers = Modifiers {
            ctrl: key.key_modifiers.contains(&KeyModifier::Ctrl),
            alt: key.key_modifiers.contains(&KeyModifier::Alt),
            shift: key.key_modifiers.contains(&KeyModifier::Shift),
        };

        let sym = match key.bare_key {
            BareKey::Char(c) => KeySym::Char(c),
            BareKey::Backspace => KeySym::Backspace,
            BareKey::Up => KeySym::Up,
            BareKey::Down => KeySym::Down,
            BareKey::Left => KeySym::Left,
            BareKey::Right => KeySym::Right,
            BareKey::Tab if modifiers.shift => KeySym::BackTab,
            BareKey::Tab => KeySym::Tab,
            BareKey::Home => KeySym::Home,
            BareKey::Esc => KeySym::Escape,
            BareKey::Enter => KeySym::Enter,
            _ => KeySym::Other,
        };

        Self { sym, modifiers }
    }
}

/// An edit, navigation or session command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Append a character to the query.
    Insert(char),
    /// Delete the last character of the query.
    DeleteLast,
    /// Delete the last word of the query.
    DeleteWord,
    /// Empty the query.
    Clear,
    SelectPrevious,
    SelectNext,
    /// Jump back to the first result.
    Reset,
    /// Abort without a selection.
    Close,
    /// Accept the highlighted result.
    Submit,
}

/// What a rule listens for.
#[derive(Debug, Clone, Copy)]
enum Trigger {
    Printable,
    Key(KeySym),
    Ctrl(char),
}

impl Trigger {
    fn fires(self, event: &KeyEvent) -> bool {
        match self {
            Self::Printable => event.printable().is_some(),
            Self::Key(sym) => event.sym == sym,
            Self::Ctrl(letter) => event.is_ctrl_chord(letter),
        }
    }
}

/// What a rule produces.
#[derive(Debug, Clone, Copy)]
enum Binding {
    /// Insert the typed character.
    Insert,
    Fixed(Command),
}

/// Key rules, highest priority first.
static KEYMAP: &[(&[Trigger], Binding)] = &[
    (&[Trigger::Printable], Binding::Insert),
    (&[Trigger::Key(KeySym::Backspace)], Binding::Fixed(Command::DeleteLast)),
    (&[Trigger::Ctrl('w')], Binding::Fixed(Command::DeleteWord)),
    (&[Trigger::Ctrl('u')], Binding::Fixed(Command::Clear)),
    (
        &[
            Trigger::Key(KeySym::Up),
            Trigger::Key(KeySym::Left),
            Trigger::Key(KeySym::BackTab),
            Trigger::Ctrl('k'),
        ],
        Binding::Fixed(Command::SelectPrevious),
    ),
    (
        &[
            Trigger::Key(KeySym::Down),
            Trigger::Key(KeySym::Right),
            Trigger::Key(KeySym::Tab),
            Trigger::Ctrl('j'),
        ],
        Binding::Fixed(Command::SelectNext),
    ),
    (&[Trigger::Key(KeySym::Home)], Binding::Fixed(Command::Reset)),
    (
        &[Trigger::Key(KeySym::Escape), Trigger::Ctrl('c')],
        Binding::Fixed(Command::Close),
    ),
    (&[Trigger::Key(KeySym::Enter)], Binding::Fixed(Command::Submit)),
];

/// Maps a key press to the command of the first matching rule.
///
/// # Example
///
/// ```
/// use zofi::app::{classify, Command, KeyEvent, KeySym};
///
/// assert_eq!(classify(&KeyEvent::new(KeySym::Char('x'))), Some(Command::Insert('x')));
/// assert_eq!(classify(&KeyEvent::ctrl('w')), Some(Command::DeleteWord));
/// assert_eq!(classify(&KeyEvent::new(KeySym::Other)), None);
/// ```
#[must_use]
pub fn classify(event: &KeyEvent) -> Option<Command> {
    KEYMAP.iter().find_map(|(triggers, binding)| {
        if !triggers.iter().any(|trigger| trigger.fires(event)) {
            return None;
        }
        match binding {
            Binding::Insert => event.printable().map(Command::Insert),
            Binding::Fixed(command) => Some(*command),
        }
    })
}
