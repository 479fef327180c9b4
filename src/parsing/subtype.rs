//! System subtype classification.
//!
//! [`SUBTYPE_RULES`] is evaluated top to bottom and the first matching rule
//! wins. Join requests are checked before the general join phrasing, since
//! "requested to join" would otherwise never be reached.

use std::sync::OnceLock;

use regex::Regex;

use crate::entry::SystemSubtype;

const JOIN_PHRASES: &[&str] = &[
    "joined using",
    "joined via",
    "joined from the community",
    "joined using this group's",
    "joined the group",
];

const ADD_PHRASES: &[&str] = &["added ", "invited "];

const REMOVE_PHRASES: &[&str] = &["removed "];

const CHANGE_PHRASES: &[&str] = &[
    "changed ",
    "changed the group settings",
    "changed group settings",
    "changed this group's",
    "changed to allow only admins",
    "changed to allow all participants",
    "changed to only admins",
    "changed to everyone",
    "privacy settings",
    "created this group",
    "updated this group's",
];

const DELETE_PHRASES: &[&str] = &["this message was deleted", "you deleted this message"];

const SYSTEM_TEXT_PHRASES: &[&str] = &[
    "messages and calls are end-to-end encrypted",
    "missed voice call",
];

/// Sender names that the export uses for automated events.
const SYSTEM_ROLES: &[&str] = &["community", "whatsapp", "system"];

fn admin_role_re() -> &'static Regex {
    static ADMIN_ROLE_RE: OnceLock<Regex> = OnceLock::new();
    ADMIN_ROLE_RE
        .get_or_init(|| Regex::new(r"(?:^|\s)admin(?:istrator)?$").expect("valid admin role regex"))
}

/// Normalized view of a notice handed to every rule.
#[derive(Debug, Clone)]
pub struct SubtypeInput {
    /// Trimmed, lower-cased sender; empty when absent.
    pub sender: String,
    /// Trimmed, lower-cased body.
    pub body: String,
}

impl SubtypeInput {
    pub fn new(sender: Option<&str>, body: &str) -> Self {
        Self {
            sender: sender.unwrap_or_default().trim().to_lowercase(),
            body: body.trim().to_lowercase(),
        }
    }

    /// Absent or blank sender, a system role, or an admin role.
    pub fn auto_attributable(&self) -> bool {
        self.sender.is_empty()
            || SYSTEM_ROLES.contains(&self.sender.as_str())
            || admin_role_re().is_match(&self.sender)
    }

    fn contains_any(&self, phrases: &[&str]) -> bool {
        phrases.iter().any(|phrase| self.body.contains(phrase))
    }

    fn starts_with_any(&self, phrases: &[&str]) -> bool {
        phrases.iter().any(|phrase| self.body.starts_with(phrase))
    }
}

pub type SubtypePredicate = fn(&SubtypeInput) -> bool;

pub fn is_join_request(input: &SubtypeInput) -> bool {
    input.body.contains("requested to join")
}

pub fn is_join(input: &SubtypeInput) -> bool {
    input.contains_any(JOIN_PHRASES) && input.auto_attributable()
}

pub fn is_add(input: &SubtypeInput) -> bool {
    input.contains_any(ADD_PHRASES)
        && (input.auto_attributable() || input.sender == "self community")
}

pub fn is_remove(input: &SubtypeInput) -> bool {
    input.contains_any(REMOVE_PHRASES)
        && (input.auto_attributable() || input.sender == "self community")
}

pub fn is_leave(input: &SubtypeInput) -> bool {
    input.body.contains(" left") && (input.auto_attributable() || input.body.ends_with(" left"))
}

pub fn is_change(input: &SubtypeInput) -> bool {
    input.contains_any(CHANGE_PHRASES) && (input.auto_attributable() || input.sender == "you")
}

pub fn is_approval(input: &SubtypeInput) -> bool {
    input.body.contains("approved") && input.body.contains("join request")
}

pub fn is_rejection(input: &SubtypeInput) -> bool {
    input.body.contains("declined") && input.body.contains("join request")
}

pub fn is_deletion(input: &SubtypeInput) -> bool {
    input.starts_with_any(DELETE_PHRASES)
}

pub fn is_system_text(input: &SubtypeInput) -> bool {
    input.starts_with_any(SYSTEM_TEXT_PHRASES)
}

/// Ordered (predicate, subtype) table; first match wins.
pub const SUBTYPE_RULES: &[(SubtypePredicate, SystemSubtype)] = &[
    (is_join_request, SystemSubtype::MembershipApprovalRequest),
    (is_join, SystemSubtype::TextJoin),
    (is_add, SystemSubtype::TextAdd),
    (is_remove, SystemSubtype::TextRemove),
    (is_leave, SystemSubtype::TextLeave),
    (is_change, SystemSubtype::TextChange),
    (is_approval, SystemSubtype::MembershipApproval),
    (is_rejection, SystemSubtype::MembershipApprovalRejected),
    (is_deletion, SystemSubtype::TextDelete),
    (is_system_text, SystemSubtype::TextSystem),
];

/// Assigns a subtype to a notice attributed to `sender` with `body`.
///
/// Returns `None` for an empty body or when no rule matches.
pub fn classify_subtype(sender: Option<&str>, body: &str) -> Option<SystemSubtype> {
    let input = SubtypeInput::new(sender, body);
    if input.body.is_empty() {
        return None;
    }
    SUBTYPE_RULES
        .iter()
        .find(|(applies, _)| applies(&input))
        .map(|&(_, subtype)| subtype)
}
