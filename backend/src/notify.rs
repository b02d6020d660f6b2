//! Player notifications
//!
//! Templates carry a single `{TAX}` placeholder that is replaced with the
//! amount formatted to two decimals. `&`-prefixed colour and format codes are
//! translated to the section-sign form understood by game clients.

use crate::models::Account;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Placeholder substituted with the formatted amount
pub const TAX_PLACEHOLDER: &str = "{TAX}";

const ALT_COLOR_CHAR: char = '&';
const SECTION_SIGN: char = '\u{00A7}';
const COLOR_CODES: &str = "0123456789abcdefklmnorABCDEFKLMNOR";

/// Translate `&x` colour codes into `§x`
///
/// Only recognised code characters are translated; a lone `&` is left as is.
pub fn translate_color_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(&next) if c == ALT_COLOR_CHAR && COLOR_CODES.contains(next) => {
                out.push(SECTION_SIGN);
                out.push(next.to_ascii_lowercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

/// Render a notification template for `amount`
///
/// Returns `None` for blank templates.
///
/// # Example
/// ```
/// use death_tax_core::notify::render_template;
///
/// let msg = render_template("&cYou paid ${TAX} in death tax", 12.5).unwrap();
/// assert_eq!(msg, "\u{00A7}cYou paid $12.50 in death tax");
/// assert!(render_template("   ", 1.0).is_none());
/// ```
pub fn render_template(template: &str, amount: f64) -> Option<String> {
    if template.trim().is_empty() {
        return None;
    }
    let formatted = format!("{:.2}", amount);
    Some(translate_color_codes(
        &template.replace(TAX_PLACEHOLDER, &formatted),
    ))
}

/// Session/chat capability consumed by the settlement engine
pub trait Notifier: Send + Sync {
    /// Whether `account` currently has an active session
    fn is_online(&self, account: &Account) -> bool;

    /// Deliver an already rendered message
    fn send_message(&self, account: &Account, message: &str);

    /// Best-effort notification; silently skipped for offline recipients and
    /// blank templates
    fn notify(&self, account: &Account, template: &str, amount: f64) {
        if !self.is_online(account) {
            return;
        }
        if let Some(message) = render_template(template, amount) {
            self.send_message(account, &message);
        }
    }
}

/// A message handed to a player
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DeliveredMessage {
    pub recipient: String,
    pub message: String,
}

/// Notifier that records delivered messages
///
/// Tracks which accounts are online; messages for anyone else are dropped.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    online: Mutex<HashSet<Uuid>>,
    delivered: Mutex<Vec<DeliveredMessage>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_online(&self, account: &Account, online: bool) {
        let mut sessions = lock(&self.online);
        if online {
            sessions.insert(account.id());
        } else {
            sessions.remove(&account.id());
        }
    }

    pub fn delivered(&self) -> Vec<DeliveredMessage> {
        lock(&self.delivered).clone()
    }

    /// Messages delivered to the account named `name`
    pub fn messages_for(&self, name: &str) -> Vec<String> {
        lock(&self.delivered)
            .iter()
            .filter(|m| m.recipient == name)
            .map(|m| m.message.clone())
            .collect()
    }

    pub fn take_delivered(&self) -> Vec<DeliveredMessage> {
        std::mem::take(&mut *lock(&self.delivered))
    }
}

impl Notifier for RecordingNotifier {
    fn is_online(&self, account: &Account) -> bool {
        lock(&self.online).contains(&account.id())
    }

    fn send_message(&self, account: &Account, message: &str) {
        lock(&self.delivered).push(DeliveredMessage {
            recipient: account.name().to_string(),
            message: message.to_string(),
        });
    }
}

impl<T: Notifier + ?Sized> Notifier for std::sync::Arc<T> {
    fn is_online(&self, account: &Account) -> bool {
        (**self).is_online(account)
    }

    fn send_message(&self, account: &Account, message: &str) {
        (**self).send_message(account, message)
    }
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn is_online(&self, account: &Account) -> bool {
        (**self).is_online(account)
    }

    fn send_message(&self, account: &Account, message: &str) {
        (**self).send_message(account, message)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
