pub mod dialog;
pub mod filter;
pub mod form;
pub mod store;

use serde::{Deserialize, Serialize};

use crate::error::{FlowError, RecordError};
use crate::records::{
    system_clock, Clock, Customer, Deal, Draft, Record, RecordId,
};

pub use dialog::{DialogAction, DialogState};
pub use filter::{
    CustomerCriteria, Criteria, DealCriteria, FieldFilter, Predicate, PredicateBuilder,
    RecordFilter,
};
pub use form::FormState;
pub use store::RecordStore;

/// Toast shown after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub destructive: bool,
    pub record_id: RecordId,
}

fn title_case(kind: &str) -> String {
    let mut chars = kind.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Store, filters, form draft and dialog flow for one record type.
pub struct RecordManager<R: Record, C> {
    store: RecordStore<R>,
    filter: RecordFilter<C>,
    form: FormState<R::Draft>,
    dialog: DialogState,
    clock: Clock,
}

pub type CustomerManager = RecordManager<Customer, CustomerCriteria>;
pub type DealManager = RecordManager<Deal, DealCriteria>;

impl<R, C> RecordManager<R, C>
where
    R: Record + 'static,
    C: Criteria<R>,
{
    /// Fails if the injected records carry duplicate ids or invalid fields.
    pub fn new(initial: Vec<R>) -> Result<Self, RecordError> {
        Self::with_clock(initial, system_clock)
    }

    pub fn with_clock(initial: Vec<R>, clock: Clock) -> Result<Self, RecordError> {
        Ok(Self::around(RecordStore::new(initial)?, clock))
    }

    fn around(store: RecordStore<R>, clock: Clock) -> Self {
        Self {
            store,
            filter: RecordFilter::default(),
            form: FormState::default(),
            dialog: DialogState::Closed,
            clock,
        }
    }

    pub fn store(&self) -> &RecordStore<R> {
        &self.store
    }

    pub fn records(&self) -> &[R] {
        self.store.records()
    }

    pub fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    pub fn draft(&self) -> Option<&R::Draft> {
        self.form.draft()
    }

    pub fn filter(&self) -> &RecordFilter<C> {
        &self.filter
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.search = term.into();
    }

    pub fn set_criteria(&mut self, criteria: C) {
        self.filter.criteria = criteria;
    }

    pub fn has_active_filters(&self) -> bool {
        self.filter.is_active::<R>()
    }

    /// Back to an empty search with every field filter on "all".
    pub fn clear_filters(&mut self) {
        self.filter = RecordFilter::default();
    }

    /// Records passing the current search and field filters, in store order.
    pub fn visible(&self) -> Vec<&R> {
        self.filter.apply(self.store.records())
    }

    /// The record under edit, view or delete confirmation.
    pub fn subject(&self) -> Option<&R> {
        self.dialog.subject().and_then(|id| self.store.get(id))
    }

    fn transition(&mut self, action: DialogAction) -> Result<(), FlowError> {
        let next = self.dialog.reduce(&action)?;
        log::debug!("{} dialog: {} -> {} on {}", R::KIND, self.dialog, next, action);
        self.dialog = next;
        Ok(())
    }

    fn require(&self, id: &RecordId) -> Result<&R, FlowError> {
        self.store.get(id).ok_or_else(|| {
            FlowError::Record(RecordError::NotFound {
                kind: R::KIND,
                id: id.clone(),
            })
        })
    }

    pub fn open_create(&mut self) -> Result<(), FlowError> {
        self.transition(DialogAction::Add)?;
        let today = (self.clock)().date_naive();
        self.form.begin(R::blank_draft(today));
        Ok(())
    }

    pub fn open_edit(&mut self, id: &RecordId) -> Result<(), FlowError> {
        let draft = self.require(id)?.to_draft();
        self.transition(DialogAction::Edit(id.clone()))?;
        self.form.begin(draft);
        Ok(())
    }

    pub fn open_view(&mut self, id: &RecordId) -> Result<(), FlowError> {
        self.require(id)?;
        self.transition(DialogAction::View(id.clone()))
    }

    pub fn open_delete(&mut self, id: &RecordId) -> Result<(), FlowError> {
        self.require(id)?;
        self.transition(DialogAction::Delete(id.clone()))
    }

    pub fn set_field(&mut self, field: <R::Draft as Draft>::Field) -> Result<(), FlowError> {
        if !self.dialog.has_form() || !self.form.set(field) {
            return Err(FlowError::NoOpenForm);
        }
        Ok(())
    }

    /// Submit the open create or edit form.
    ///
    /// Input errors keep the dialog and draft open. A missing record closes
    /// the dialog since there is nothing left to edit.
    pub fn submit(&mut self) -> Result<Notice, FlowError> {
        let draft = match self.form.commit() {
            Some(draft) if self.dialog.has_form() => draft,
            _ => {
                return Err(FlowError::InvalidTransition {
                    state: self.dialog.clone(),
                    action: DialogAction::Submit,
                })
            }
        };
        let now = (self.clock)();
        let kind = title_case(R::KIND);

        let notice = match self.dialog.clone() {
            DialogState::Creating => {
                let record = R::create(RecordId::generate(), draft, now);
                let added = self.store.add(record)?;
                log::info!("Created {} {}", R::KIND, added.id());
                Notice {
                    title: format!("{} Created", kind),
                    description: format!("{} has been added successfully.", added.display_name()),
                    destructive: false,
                    record_id: added.id().clone(),
                }
            }
            DialogState::Editing(id) => match self.store.update(&id, &draft, now) {
                Ok(updated) => {
                    log::info!("Updated {} {}", R::KIND, id);
                    Notice {
                        title: format!("{} Updated", kind),
                        description: format!(
                            "{} has been updated successfully.",
                            updated.display_name()
                        ),
                        destructive: false,
                        record_id: id,
                    }
                }
                Err(e) => {
                    if e.is_not_found() {
                        log::warn!("{} {} vanished during edit", R::KIND, id);
                        self.close_all();
                    }
                    return Err(e.into());
                }
            },
            other => {
                return Err(FlowError::InvalidTransition {
                    state: other,
                    action: DialogAction::Submit,
                })
            }
        };

        self.transition(DialogAction::Submit)?;
        self.form.discard();
        Ok(notice)
    }

    pub fn confirm_delete(&mut self) -> Result<Notice, FlowError> {
        let id = match &self.dialog {
            DialogState::ConfirmingDelete(id) => id.clone(),
            other => {
                return Err(FlowError::InvalidTransition {
                    state: other.clone(),
                    action: DialogAction::Confirm,
                })
            }
        };

        match self.store.remove(&id) {
            Ok(removed) => {
                log::info!("Deleted {} {}", R::KIND, id);
                self.transition(DialogAction::Confirm)?;
                Ok(Notice {
                    title: format!("{} Deleted", title_case(R::KIND)),
                    description: format!("{} has been removed.", removed.display_name()),
                    destructive: true,
                    record_id: id,
                })
            }
            Err(e) => {
                self.close_all();
                Err(e.into())
            }
        }
    }

    /// Close the open dialog without touching the store.
    pub fn cancel(&mut self) -> Result<(), FlowError> {
        self.transition(DialogAction::Cancel)?;
        self.form.discard();
        Ok(())
    }

    pub fn close_all(&mut self) {
        self.dialog = DialogState::Closed;
        self.form.discard();
    }
}

impl<R, C> Default for RecordManager<R, C>
where
    R: Record + 'static,
    C: Criteria<R>,
{
    fn default() -> Self {
        Self::around(RecordStore::default(), system_clock)
    }
}
