//! Knowledge base and history surface: list/create/delete of past-project
//! examples, the read-only history view, attachment retrieval, and the
//! confirmed bulk wipe. All mutations follow remote-first ordering: the
//! store write is confirmed before anything is reported as changed.

pub mod handlers;
