use crate::backend::{AuthState, IncidentBackend};
use crate::error::{IncidentError, Operation};
use crate::list::IncidentList;
use crate::model::{Incident, IncidentDraft};
use crate::notice::Notice;
use std::cell::RefCell;
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Refresh {
    Loaded(usize),
    /// Not logged in; nothing was fetched.
    Skipped,
}

/// View model for the incident list.
///
/// Every operation does one backend round-trip and touches local state only
/// after it succeeds. Borrows are never held across an `.await`, so several
/// operations may be in flight at once on one thread; whichever completes
/// last wins.
pub struct IncidentStore<B> {
    backend: B,
    list: RefCell<IncidentList>,
    notice: RefCell<Option<Notice>>,
}

impl<B: IncidentBackend> IncidentStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            list: RefCell::new(IncidentList::default()),
            notice: RefCell::new(None),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn snapshot(&self) -> IncidentList {
        self.list.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.list.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.borrow().is_empty()
    }

    pub fn get(&self, sys_id: &str) -> Option<Incident> {
        self.list.borrow().get(sys_id).cloned()
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice.borrow().clone()
    }

    pub fn take_notice(&self) -> Option<Notice> {
        self.notice.borrow_mut().take()
    }

    pub fn dismiss_notice(&self) {
        self.notice.replace(None);
    }

    fn report<T>(&self, op: Operation, result: &Result<T, IncidentError>) {
        let notice = match result {
            Ok(_) => Notice::success(op),
            Err(err) => {
                warn!(?op, error = %err, "incident operation failed");
                Some(Notice::failure(op, err))
            }
        };
        if let Some(notice) = notice {
            self.notice.replace(Some(notice));
        }
    }

    /// Drops every held record and any pending notice.
    pub fn clear(&self) {
        self.list.borrow_mut().replace_all(Vec::new());
        self.notice.replace(None);
    }

    /// Replaces the local list with the backend's. Skipped unless logged in.
    pub async fn refresh(&self, auth: AuthState) -> Result<Refresh, IncidentError> {
        if !auth.is_logged_in() {
            return Ok(Refresh::Skipped);
        }
        let result = self.backend.list().await.map(|items| {
            let count = items.len();
            self.list.borrow_mut().replace_all(items);
            info!(count, "incident list loaded");
            Refresh::Loaded(count)
        });
        self.report(Operation::List, &result);
        result
    }

    pub async fn create(&self, draft: &IncidentDraft) -> Result<Incident, IncidentError> {
        let result = self.backend.create(draft).await;
        if let Ok(incident) = &result {
            info!(sys_id = %incident.sys_id, number = %incident.number, "incident created");
            self.list.borrow_mut().apply_created(incident.clone());
        }
        self.report(Operation::Create, &result);
        result
    }

    /// Returns the merged local entry, or `None` when the record was not held
    /// locally (the backend write still happened).
    pub async fn update(
        &self,
        sys_id: &str,
        draft: &IncidentDraft,
    ) -> Result<Option<Incident>, IncidentError> {
        let result = match self.backend.update(sys_id, draft).await {
            Ok(patch) => {
                info!(sys_id, "incident updated");
                Ok(self.list.borrow_mut().apply_updated(sys_id, patch).cloned())
            }
            Err(err) => Err(err),
        };
        self.report(Operation::Update, &result);
        result
    }

    pub async fn delete(&self, sys_id: &str) -> Result<bool, IncidentError> {
        let result = match self.backend.delete(sys_id).await {
            Ok(()) => {
                info!(sys_id, "incident deleted");
                Ok(self.list.borrow_mut().apply_deleted(sys_id))
            }
            Err(err) => Err(err),
        };
        self.report(Operation::Delete, &result);
        result
    }
}
