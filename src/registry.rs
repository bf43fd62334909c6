use std::{borrow::Cow, collections::HashMap, sync::Arc};

use thiserror::Error;

use crate::{case::Case, hook::Hook};

/// The reserved group name whose hooks run around every case of every group.
pub const GLOBAL_GROUP: &str = "global";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no cases registered for group {group:?}")]
pub struct GroupNotFound {
    pub group: String,
}

/// The in-memory table of declared cases and hooks.
///
/// Case lists are append-only; running a group snapshots the list it was
/// started with. Hook registration is last-one-wins per group, silently.
#[derive(Debug)]
pub struct Registry {
    cases: HashMap<Cow<'static, str>, Vec<Arc<Case>>>,
    before_each: HashMap<Cow<'static, str>, Hook>,
    after_each: HashMap<Cow<'static, str>, Hook>,
}

impl Default for Registry {
    fn default() -> Self {
        // The hook tables always carry the global entry, so global lookups
        // never need a fallback.
        let mut before_each = HashMap::new();
        before_each.insert(Cow::Borrowed(GLOBAL_GROUP), Hook::noop());
        let mut after_each = HashMap::new();
        after_each.insert(Cow::Borrowed(GLOBAL_GROUP), Hook::noop());

        Self {
            cases: HashMap::new(),
            before_each,
            after_each,
        }
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_case(&mut self, group: impl Into<Cow<'static, str>>, case: Case) {
        self.cases.entry(group.into()).or_default().push(Arc::new(case));
    }

    pub fn set_before_each(&mut self, group: impl Into<Cow<'static, str>>, hook: Hook) {
        self.before_each.insert(group.into(), hook);
    }

    pub fn set_after_each(&mut self, group: impl Into<Cow<'static, str>>, hook: Hook) {
        self.after_each.insert(group.into(), hook);
    }

    pub fn cases(&self, group: &str) -> Result<&[Arc<Case>], GroupNotFound> {
        match self.cases.get(group) {
            Some(cases) => Ok(cases),
            None => Err(GroupNotFound {
                group: group.to_string(),
            }),
        }
    }

    pub fn before_each(&self, group: &str) -> Hook {
        resolve(&self.before_each, group)
    }

    pub fn after_each(&self, group: &str) -> Hook {
        resolve(&self.after_each, group)
    }

    pub fn global_before_each(&self) -> Hook {
        resolve(&self.before_each, GLOBAL_GROUP)
    }

    pub fn global_after_each(&self) -> Hook {
        resolve(&self.after_each, GLOBAL_GROUP)
    }
}

fn resolve(table: &HashMap<Cow<'static, str>, Hook>, group: &str) -> Hook {
    table.get(group).cloned().unwrap_or_default()
}
