use crate::records::Draft;

/// Holds the draft of an open create/edit session.
///
/// The draft is an owned copy; editing it never touches the stored record.
#[derive(Debug, Clone)]
pub struct FormState<D: Draft> {
    draft: Option<D>,
}

impl<D: Draft> Default for FormState<D> {
    fn default() -> Self {
        Self { draft: None }
    }
}

impl<D: Draft> FormState<D> {
    pub fn begin(&mut self, initial: D) {
        self.draft = Some(initial);
    }

    pub fn is_active(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&D> {
        self.draft.as_ref()
    }

    /// Replace one field. Returns false when no session is open.
    pub fn set(&mut self, field: D::Field) -> bool {
        match self.draft.as_mut() {
            Some(draft) => {
                draft.set(field);
                true
            }
            None => false,
        }
    }

    /// Current draft as a submission candidate. The session stays open so
    /// the user can fix a rejected submission.
    pub fn commit(&self) -> Option<D> {
        self.draft.clone()
    }

    pub fn discard(&mut self) {
        self.draft = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Customer, CustomerField, Record};
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()
    }

    #[test]
    fn set_without_session_is_ignored() {
        let mut form = FormState::<<Customer as Record>::Draft>::default();
        assert!(!form.set(CustomerField::Notes("x".to_string())));
        assert!(form.commit().is_none());
    }

    #[test]
    fn set_replaces_one_field_and_keeps_others() {
        let mut form = FormState::default();
        form.begin(Customer::blank_draft(today()));
        assert!(form.set(CustomerField::CompanyName("Acme".to_string())));

        let draft = form.commit().unwrap();
        assert_eq!(draft.company_name.as_deref(), Some("Acme"));
        assert_eq!(draft.status, Customer::blank_draft(today()).status);
        assert!(form.is_active());
    }

    #[test]
    fn discard_clears_draft() {
        let mut form = FormState::default();
        form.begin(Customer::blank_draft(today()));
        form.discard();
        assert!(!form.is_active());
        assert!(form.draft().is_none());
    }
}
