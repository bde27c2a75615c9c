//! Well-known WAMP URIs.
//!
//! Each group is a module of `&'static str` constants plus an `ALL` table.
//! [`is_known`] checks a URI against every table.

/// Error URIs carried by ERROR and ABORT.
pub mod error {
    pub const PREFIX: &str = "wamp.error";

    pub const NOT_AUTHORIZED: &str = "wamp.error.not_authorized";
    pub const PROCEDURE_ALREADY_EXISTS: &str = "wamp.error.procedure_already_exists";
    pub const PROTOCOL_VIOLATION: &str = "wamp.error.protocol_violation";
    pub const NO_SUCH_REALM: &str = "wamp.error.no_such_realm";
    pub const NO_SUCH_SUBSCRIPTION: &str = "wamp.error.no_such_subscription";
    pub const NO_SUCH_REGISTRATION: &str = "wamp.error.no_such_registration";
    pub const NO_SUCH_PROCEDURE: &str = "wamp.error.no_such_procedure";
    pub const INVALID_URI: &str = "wamp.error.invalid_uri";
    pub const INVALID_ARGUMENT: &str = "wamp.error.invalid_argument";
    pub const AUTHORIZATION_FAILED: &str = "wamp.error.authorization_failed";
    pub const NO_SUCH_ROLE: &str = "wamp.error.no_such_role";
    pub const NO_SUCH_SESSION: &str = "wamp.error.no_such_session";

    // Advanced profile.
    pub const CANCELED: &str = "wamp.error.canceled";
    pub const OPTION_NOT_ALLOWED: &str = "wamp.error.option_not_allowed";
    pub const NO_ELIGIBLE_CALLEE: &str = "wamp.error.no_eligible_callee";
    pub const OPTION_DISALLOWED_DISCLOSE_ME: &str = "wamp.error.option_disallowed.disclose_me";
    pub const NETWORK_FAILURE: &str = "wamp.error.network_failure";
    pub const RUNTIME_ERROR: &str = "wamp.error.runtime_error";

    pub const ALL: &[&str] = &[
        NOT_AUTHORIZED,
        PROCEDURE_ALREADY_EXISTS,
        PROTOCOL_VIOLATION,
        NO_SUCH_REALM,
        NO_SUCH_SUBSCRIPTION,
        NO_SUCH_REGISTRATION,
        NO_SUCH_PROCEDURE,
        INVALID_URI,
        INVALID_ARGUMENT,
        AUTHORIZATION_FAILED,
        NO_SUCH_ROLE,
        NO_SUCH_SESSION,
        CANCELED,
        OPTION_NOT_ALLOWED,
        NO_ELIGIBLE_CALLEE,
        OPTION_DISALLOWED_DISCLOSE_ME,
        NETWORK_FAILURE,
        RUNTIME_ERROR,
    ];
}

/// Reasons carried by GOODBYE and ABORT.
pub mod close {
    pub const GOODBYE_AND_OUT: &str = "wamp.close.goodbye_and_out";
    pub const CLOSE_REALM: &str = "wamp.close.close_realm";

    pub const ALL: &[&str] = &[GOODBYE_AND_OUT, CLOSE_REALM];
}

/// Registration meta API procedures and topics.
pub mod registration {
    pub const ON_REGISTER: &str = "wamp.registration.on_register";
    pub const ON_UNREGISTER: &str = "wamp.registration.on_unregister";
    pub const ON_DELETE: &str = "wamp.registration.on_delete";
    pub const LIST: &str = "wamp.registration.list";
    pub const LOOKUP: &str = "wamp.registration.lookup";
    pub const MATCH: &str = "wamp.registration.match";
    pub const GET: &str = "wamp.registration.get";
    pub const LIST_CALLEES: &str = "wamp.registration.list_callees";
    pub const COUNT_CALLEES: &str = "wamp.registration.count_callees";

    pub const ALL: &[&str] = &[
        ON_REGISTER,
        ON_UNREGISTER,
        ON_DELETE,
        LIST,
        LOOKUP,
        MATCH,
        GET,
        LIST_CALLEES,
        COUNT_CALLEES,
    ];
}

/// Subscription meta API procedures and topics.
pub mod subscription {
    pub const LIST: &str = "wamp.subscription.list";
    pub const LOOKUP: &str = "wamp.subscription.lookup";
    pub const MATCH: &str = "wamp.subscription.match";
    pub const GET: &str = "wamp.subscription.get";
    pub const LIST_SUBSCRIBERS: &str = "wamp.subscription.list_subscribers";
    pub const COUNT_SUBSCRIBERS: &str = "wamp.subscription.count_subscribers";
    pub const ON_SUBSCRIBE: &str = "wamp.subscription.on_subscribe";
    pub const ON_UNSUBSCRIBE: &str = "wamp.subscription.on_unsubscribe";
    pub const ON_DELETE: &str = "wamp.subscription.on_delete";

    pub const ALL: &[&str] = &[
        LIST,
        LOOKUP,
        MATCH,
        GET,
        LIST_SUBSCRIBERS,
        COUNT_SUBSCRIBERS,
        ON_SUBSCRIBE,
        ON_UNSUBSCRIBE,
        ON_DELETE,
    ];
}

/// Event history procedures.
pub mod history {
    pub const LAST: &str = "wamp.topic.history.last";
    pub const SINCE: &str = "wamp.topic.history.since";
    pub const AFTER: &str = "wamp.topic.history.after";

    pub const ALL: &[&str] = &[LAST, SINCE, AFTER];
}

/// Session meta API procedures and topics.
pub mod session {
    pub const ON_JOIN: &str = "wamp.session.on_join";
    pub const ON_LEAVE: &str = "wamp.session.on_leave";
    pub const COUNT: &str = "wamp.session.count";
    pub const LIST: &str = "wamp.session.list";
    pub const GET: &str = "wamp.session.get";
    pub const FLUSH_TESTAMENTS: &str = "wamp.session.flush_testaments";

    pub const ALL: &[&str] = &[ON_JOIN, ON_LEAVE, COUNT, LIST, GET, FLUSH_TESTAMENTS];
}

/// All URI tables, in lookup order.
pub const TABLES: &[&[&str]] = &[
    error::ALL,
    close::ALL,
    registration::ALL,
    subscription::ALL,
    history::ALL,
    session::ALL,
];

/// Returns `true` if `uri` is one of the well-known URIs.
#[must_use]
pub fn is_known(uri: &str) -> bool {
    TABLES.iter().any(|table| table.contains(&uri))
}

/// Returns `true` if `uri` is in the reserved `wamp.error` namespace.
#[must_use]
pub fn is_error(uri: &str) -> bool {
    uri.strip_prefix(error::PREFIX)
        .is_some_and(|rest| rest.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn uris_are_unique() {
        let mut seen = HashSet::new();
        for uri in TABLES.iter().flat_map(|table| table.iter()) {
            assert!(seen.insert(*uri), "duplicate uri {uri}");
        }
    }

    #[test]
    fn uris_are_namespaced() {
        for uri in TABLES.iter().flat_map(|table| table.iter()) {
            assert!(uri.starts_with("wamp."), "{uri}");
        }
        assert!(error::ALL.iter().all(|uri| is_error(uri)));
    }

    #[test]
    fn lookup() {
        assert!(is_known(close::GOODBYE_AND_OUT));
        assert!(is_known(history::SINCE));
        assert!(is_known(error::OPTION_DISALLOWED_DISCLOSE_ME));
        assert!(!is_known(error::PREFIX));
        assert!(!is_known("com.example.add"));
    }

    #[test]
    fn error_namespace() {
        assert!(is_error("wamp.error.custom"));
        assert!(!is_error("wamp.errors.custom"));
        assert!(!is_error(close::CLOSE_REALM));
    }
}
