//! Message kinds and their wire tags.

use std::fmt;

use crate::field::FieldRole;

/// A WAMP message kind.
///
/// Every known kind has a fixed integer tag on the wire. `Unknown` is the
/// fallback for tags outside the Basic and Advanced Profile message set and
/// never appears in the tag space itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MessageKind {
    Hello,
    Welcome,
    Abort,
    Challenge,
    Authenticate,
    Goodbye,
    Error,
    Publish,
    Published,
    Subscribe,
    Subscribed,
    Unsubscribe,
    Unsubscribed,
    Event,
    Call,
    Cancel,
    Result,
    Register,
    Registered,
    Unregister,
    Unregistered,
    Invocation,
    Interrupt,
    Yield,
    Unknown,
}

impl MessageKind {
    /// All kinds that have a wire tag, in tag order.
    pub const KNOWN: [Self; 24] = [
        Self::Hello,
        Self::Welcome,
        Self::Abort,
        Self::Challenge,
        Self::Authenticate,
        Self::Goodbye,
        Self::Error,
        Self::Publish,
        Self::Published,
        Self::Subscribe,
        Self::Subscribed,
        Self::Unsubscribe,
        Self::Unsubscribed,
        Self::Event,
        Self::Call,
        Self::Cancel,
        Self::Result,
        Self::Register,
        Self::Registered,
        Self::Unregister,
        Self::Unregistered,
        Self::Invocation,
        Self::Interrupt,
        Self::Yield,
    ];

    /// Classifies a wire tag. Tags outside the known set yield `Unknown`.
    #[must_use]
    pub const fn from_tag(tag: u64) -> Self {
        match tag {
            1 => Self::Hello,
            2 => Self::Welcome,
            3 => Self::Abort,
            4 => Self::Challenge,
            5 => Self::Authenticate,
            6 => Self::Goodbye,
            8 => Self::Error,
            16 => Self::Publish,
            17 => Self::Published,
            32 => Self::Subscribe,
            33 => Self::Subscribed,
            34 => Self::Unsubscribe,
            35 => Self::Unsubscribed,
            36 => Self::Event,
            48 => Self::Call,
            49 => Self::Cancel,
            50 => Self::Result,
            64 => Self::Register,
            65 => Self::Registered,
            66 => Self::Unregister,
            67 => Self::Unregistered,
            68 => Self::Invocation,
            69 => Self::Interrupt,
            70 => Self::Yield,
            _ => Self::Unknown,
        }
    }

    /// Returns the wire tag, or `None` for `Unknown`.
    #[must_use]
    pub const fn tag(self) -> Option<u64> {
        let tag = match self {
            Self::Hello => 1,
            Self::Welcome => 2,
            Self::Abort => 3,
            Self::Challenge => 4,
            Self::Authenticate => 5,
            Self::Goodbye => 6,
            Self::Error => 8,
            Self::Publish => 16,
            Self::Published => 17,
            Self::Subscribe => 32,
            Self::Subscribed => 33,
            Self::Unsubscribe => 34,
            Self::Unsubscribed => 35,
            Self::Event => 36,
            Self::Call => 48,
            Self::Cancel => 49,
            Self::Result => 50,
            Self::Register => 64,
            Self::Registered => 65,
            Self::Unregister => 66,
            Self::Unregistered => 67,
            Self::Invocation => 68,
            Self::Interrupt => 69,
            Self::Yield => 70,
            Self::Unknown => return None,
        };
        Some(tag)
    }

    /// Protocol name of the kind, e.g. `"CALL"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hello => "HELLO",
            Self::Welcome => "WELCOME",
            Self::Abort => "ABORT",
            Self::Challenge => "CHALLENGE",
            Self::Authenticate => "AUTHENTICATE",
            Self::Goodbye => "GOODBYE",
            Self::Error => "ERROR",
            Self::Publish => "PUBLISH",
            Self::Published => "PUBLISHED",
            Self::Subscribe => "SUBSCRIBE",
            Self::Subscribed => "SUBSCRIBED",
            Self::Unsubscribe => "UNSUBSCRIBE",
            Self::Unsubscribed => "UNSUBSCRIBED",
            Self::Event => "EVENT",
            Self::Call => "CALL",
            Self::Cancel => "CANCEL",
            Self::Result => "RESULT",
            Self::Register => "REGISTER",
            Self::Registered => "REGISTERED",
            Self::Unregister => "UNREGISTER",
            Self::Unregistered => "UNREGISTERED",
            Self::Invocation => "INVOCATION",
            Self::Interrupt => "INTERRUPT",
            Self::Yield => "YIELD",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Returns `true` for every kind except `Unknown`.
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Returns `true` if the kind carries optional trailing args/kwargs.
    #[must_use]
    pub const fn has_payload(self) -> bool {
        matches!(
            self,
            Self::Error
                | Self::Publish
                | Self::Event
                | Self::Call
                | Self::Result
                | Self::Invocation
                | Self::Yield
        )
    }

    /// Full slot layout after the tag, including the trailing payload slots
    /// for payload-carrying kinds. Empty for `Unknown`.
    #[must_use]
    pub const fn layout(self) -> &'static [FieldRole] {
        use FieldRole::{
            Args, AuthMethod, Details, Error, Extra, Kwargs, Options, Procedure, Publication,
            Realm, Reason, Registration, Request, RequestType, Session, Signature, Subscription,
            Topic,
        };

        match self {
            Self::Hello => &[Realm, Details],
            Self::Welcome => &[Session, Details],
            Self::Abort | Self::Goodbye => &[Details, Reason],
            Self::Challenge => &[AuthMethod, Extra],
            Self::Authenticate => &[Signature, Extra],
            Self::Error => &[RequestType, Request, Details, Error, Args, Kwargs],
            Self::Publish => &[Request, Options, Topic, Args, Kwargs],
            Self::Published => &[Request, Publication],
            Self::Subscribe => &[Request, Options, Topic],
            Self::Subscribed | Self::Unsubscribe => &[Request, Subscription],
            Self::Unsubscribed | Self::Unregistered => &[Request],
            Self::Event => &[Subscription, Publication, Details, Args, Kwargs],
            Self::Call => &[Request, Options, Procedure, Args, Kwargs],
            Self::Cancel | Self::Interrupt => &[Request, Options],
            Self::Result => &[Request, Details, Args, Kwargs],
            Self::Register => &[Request, Options, Procedure],
            Self::Registered | Self::Unregister => &[Request, Registration],
            Self::Invocation => &[Request, Registration, Details, Args, Kwargs],
            Self::Yield => &[Request, Options, Args, Kwargs],
            Self::Unknown => &[],
        }
    }

    /// Mandatory slots after the tag, in wire order.
    #[must_use]
    pub fn fields(self) -> &'static [FieldRole] {
        let layout = self.layout();
        if self.has_payload() {
            &layout[..layout.len() - 2]
        } else {
            layout
        }
    }

    /// Minimum array length (tag included) of a well-formed message.
    #[must_use]
    pub fn min_len(self) -> usize {
        1 + self.fields().len()
    }

    /// Maximum array length (tag included) of a well-formed message.
    #[must_use]
    pub const fn max_len(self) -> usize {
        1 + self.layout().len()
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldShape;

    #[test]
    fn tag_kind_bijection() {
        for kind in MessageKind::KNOWN {
            let tag = kind.tag().unwrap();
            assert_eq!(MessageKind::from_tag(tag), kind, "{kind}");
        }
    }

    #[test]
    fn known_tags_are_distinct_and_sorted() {
        let tags: Vec<u64> = MessageKind::KNOWN
            .iter()
            .map(|kind| kind.tag().unwrap())
            .collect();
        let mut sorted = tags.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(tags, sorted);
    }

    #[test]
    fn unknown_has_no_tag() {
        assert_eq!(MessageKind::Unknown.tag(), None);
        assert!(!MessageKind::Unknown.is_known());
        assert!(MessageKind::Unknown.layout().is_empty());
    }

    #[test]
    fn unregistered_tags_are_unknown() {
        for tag in [0, 7, 9, 15, 18, 37, 51, 71, 1999, u64::MAX] {
            assert_eq!(MessageKind::from_tag(tag), MessageKind::Unknown, "{tag}");
        }
    }

    #[test]
    fn well_known_tag_values() {
        assert_eq!(MessageKind::Hello.tag(), Some(1));
        assert_eq!(MessageKind::Error.tag(), Some(8));
        assert_eq!(MessageKind::Event.tag(), Some(36));
        assert_eq!(MessageKind::Call.tag(), Some(48));
        assert_eq!(MessageKind::Yield.tag(), Some(70));
    }

    #[test]
    fn payload_kinds_end_with_args_kwargs() {
        for kind in MessageKind::KNOWN {
            let layout = kind.layout();
            let tail = &layout[layout.len().saturating_sub(2)..];
            if kind.has_payload() {
                assert_eq!(tail, &[FieldRole::Args, FieldRole::Kwargs], "{kind}");
            } else {
                assert!(!layout.contains(&FieldRole::Args), "{kind}");
                assert!(!layout.contains(&FieldRole::Kwargs), "{kind}");
            }
        }
    }

    #[test]
    fn mandatory_fields_have_no_list_shape() {
        for kind in MessageKind::KNOWN {
            assert!(
                kind.fields()
                    .iter()
                    .all(|role| role.shape() != FieldShape::List),
                "{kind}"
            );
        }
    }

    #[test]
    fn call_arity() {
        let kind = MessageKind::Call;
        assert_eq!(kind.min_len(), 4);
        assert_eq!(kind.max_len(), 6);
        assert_eq!(
            kind.fields(),
            &[FieldRole::Request, FieldRole::Options, FieldRole::Procedure]
        );
    }

    #[test]
    fn display_uses_protocol_name() {
        assert_eq!(MessageKind::Unsubscribed.to_string(), "UNSUBSCRIBED");
        assert_eq!(MessageKind::Unknown.to_string(), "UNKNOWN");
    }
}
