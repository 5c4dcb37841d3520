//! Engine events
//!
//! Everything that changes the activity stack or reaches an activity's
//! handlers travels through the pending buffer as an [`Event`].

use heapless::String;

use crate::error::ControlError;

/// Maximum length of an activity or event name
pub const MAX_NAME_LEN: usize = 16;

/// Maximum length of a text payload
pub const MAX_TEXT_LEN: usize = 32;

/// Conventional event name for a button press
pub const CLICK: &str = "click";

/// Activity or event name
pub type Name = String<MAX_NAME_LEN>;

/// Validate and copy a name
///
/// Names must be non-empty, at most [`MAX_NAME_LEN`] bytes, and free of
/// whitespace and control characters.
pub fn name(raw: &str) -> Result<Name, ControlError> {
    if raw.is_empty() {
        return Err(ControlError::EmptyName);
    }
    if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ControlError::InvalidName);
    }
    let mut out = Name::new();
    out.push_str(raw).map_err(|_| ControlError::NameTooLong)?;
    Ok(out)
}

/// Value carried by a custom event
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Payload {
    #[default]
    None,
    Bool(bool),
    Int(i32),
    Text(String<MAX_TEXT_LEN>),
}

impl Payload {
    /// Text payload, truncated to [`MAX_TEXT_LEN`] bytes on a char boundary
    pub fn text(raw: &str) -> Self {
        let mut out = String::new();
        for c in raw.chars() {
            if out.push(c).is_err() {
                break;
            }
        }
        Payload::Text(out)
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Payload::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Payload::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<i32> for Payload {
    fn from(v: i32) -> Self {
        Payload::Int(v)
    }
}

impl From<bool> for Payload {
    fn from(v: bool) -> Self {
        Payload::Bool(v)
    }
}

impl From<()> for Payload {
    fn from(_: ()) -> Self {
        Payload::None
    }
}

/// Pending engine event
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Create an activity and place it on top of the stack
    PushActivity(Name),
    /// Destroy the top activity and resume the one below
    PopActivity,
    /// Replace the top activity
    ChangeActivity(Name),
    /// Deliver a payload to the top activity's handlers for `name`
    Custom { name: Name, payload: Payload },
}

impl Event {
    pub fn push(activity: &str) -> Result<Self, ControlError> {
        Ok(Event::PushActivity(name(activity)?))
    }

    pub fn change(activity: &str) -> Result<Self, ControlError> {
        Ok(Event::ChangeActivity(name(activity)?))
    }

    pub fn pop() -> Self {
        Event::PopActivity
    }

    pub fn custom(event: &str, payload: impl Into<Payload>) -> Result<Self, ControlError> {
        Ok(Event::Custom {
            name: name(event)?,
            payload: payload.into(),
        })
    }

    /// True for events that change the activity stack
    pub fn is_structural(&self) -> bool {
        !matches!(self, Event::Custom { .. })
    }

    /// Activity or event name, if the event carries one
    pub fn name(&self) -> Option<&str> {
        match self {
            Event::PushActivity(n) | Event::ChangeActivity(n) => Some(n.as_str()),
            Event::Custom { name, .. } => Some(name.as_str()),
            Event::PopActivity => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_validation() {
        assert_eq!(name("home").unwrap().as_str(), "home");
        assert_eq!(name(""), Err(ControlError::EmptyName));
        assert_eq!(name("two words"), Err(ControlError::InvalidName));
        assert_eq!(name("tab\there"), Err(ControlError::InvalidName));
        assert_eq!(name("nul\0"), Err(ControlError::InvalidName));
        assert_eq!(name("a-name-that-is-far-too-long"), Err(ControlError::NameTooLong));
        // Exactly at the limit
        assert!(name("0123456789abcdef").is_ok());
    }

    #[test]
    fn test_structural_classification() {
        assert!(Event::push("home").unwrap().is_structural());
        assert!(Event::change("home").unwrap().is_structural());
        assert!(Event::pop().is_structural());
        assert!(!Event::custom(CLICK, ()).unwrap().is_structural());
    }

    #[test]
    fn test_event_names() {
        assert_eq!(Event::push("settings").unwrap().name(), Some("settings"));
        assert_eq!(Event::custom("tick", 3).unwrap().name(), Some("tick"));
        assert_eq!(Event::pop().name(), None);
    }

    #[test]
    fn test_payload_accessors() {
        assert_eq!(Payload::from(7).as_int(), Some(7));
        assert_eq!(Payload::from(true).as_bool(), Some(true));
        assert_eq!(Payload::from(7).as_bool(), None);
        assert_eq!(Payload::text("hi").as_text(), Some("hi"));
        assert_eq!(Payload::None.as_text(), None);
    }

    #[test]
    fn test_text_payload_truncates() {
        let long = "abcdefghijklmnopqrstuvwxyz0123456789";
        let payload = Payload::text(long);
        assert_eq!(payload.as_text(), Some(&long[..MAX_TEXT_LEN]));

        // Multi-byte characters are never split
        let wide = "ééééééééééééééééé"; // 17 x 2 bytes
        let text = Payload::text(wide);
        assert_eq!(text.as_text().map(str::len), Some(32));
    }
}
