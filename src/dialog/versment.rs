//! Modal entry dialog for creating or editing a versment.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Utc};

use crate::dialog::client_search::ClientSearch;
use crate::domain::client::Client;
use crate::domain::types::{ClientId, VersmentType, format_date};
use crate::domain::versment::Versment;
use crate::forms::FormError;
use crate::forms::versment::{BACKSPACE, DELETE, VersmentForm, VersmentPayload, is_amount_char};
use crate::repository::ClientReader;
use crate::services::ServiceResult;
use crate::services::client as client_service;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogState {
    Editing,
    /// Input passed validation; the dialog is closed.
    Confirmed,
    /// Dismissed without confirmation.
    Cancelled,
}

/// What the dialog held when it was confirmed.
#[derive(Debug)]
struct Confirmation {
    client_id: ClientId,
    payload: VersmentPayload,
    at: NaiveDateTime,
}

#[derive(Debug)]
pub struct VersmentDialog {
    search: ClientSearch,
    amount: String,
    kind: Option<VersmentType>,
    payment_date: String,
    year_concerned: String,
    original: Option<Versment>,
    state: DialogState,
    confirmation: Option<Confirmation>,
}

impl VersmentDialog {
    /// Opens the dialog, loading the client directory once.
    ///
    /// Pass an existing record to edit it, `None` to create a new one.
    pub fn open<R>(repo: &R, versment: Option<Versment>) -> ServiceResult<Self>
    where
        R: ClientReader + ?Sized,
    {
        let clients = client_service::fetch_all_clients(repo).map_err(|err| {
            log::error!("Failed to load clients for the versment dialog: {err}");
            err
        })?;
        Ok(Self::new(clients, versment, Local::now().date_naive()))
    }

    /// Builds the dialog from an already loaded client list.
    ///
    /// In create mode the payment date defaults to `today`, the year
    /// concerned to its year and the type to the first one offered.
    pub fn new(clients: Vec<Client>, versment: Option<Versment>, today: NaiveDate) -> Self {
        let mut dialog = Self {
            search: ClientSearch::new(clients),
            amount: String::new(),
            kind: VersmentType::ALL.first().copied(),
            payment_date: format_date(today),
            year_concerned: today.year().to_string(),
            original: None,
            state: DialogState::Editing,
            confirmation: None,
        };

        if let Some(versment) = versment {
            dialog.search.select_client(versment.client_id.get());
            dialog.amount = versment.amount.to_string();
            dialog.kind = Some(versment.kind);
            dialog.payment_date = format_date(versment.payment_date);
            dialog.year_concerned = versment.year_concerned.to_string();
            dialog.original = Some(versment);
        }

        dialog
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn search(&self) -> &ClientSearch {
        &self.search
    }

    /// Client picker, for forwarding input and selection events.
    ///
    /// Changes made here after confirmation do not alter [`Self::result`].
    pub fn search_mut(&mut self) -> &mut ClientSearch {
        &mut self.search
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    fn is_editing(&self) -> bool {
        self.state == DialogState::Editing
    }

    pub fn set_amount(&mut self, amount: &str) {
        if !self.is_editing() {
            return;
        }
        self.amount = amount.to_string();
    }

    /// Applies a character typed into the amount field.
    ///
    /// Returns `false` when the character is swallowed.
    pub fn type_amount_char(&mut self, c: char) -> bool {
        if !self.is_editing() || !is_amount_char(c) {
            return false;
        }
        match c {
            BACKSPACE => {
                self.amount.pop();
            }
            DELETE => {}
            _ => self.amount.push(c),
        }
        true
    }

    pub fn kind(&self) -> Option<VersmentType> {
        self.kind
    }

    pub fn set_kind(&mut self, kind: Option<VersmentType>) {
        if self.is_editing() {
            self.kind = kind;
        }
    }

    pub fn payment_date(&self) -> &str {
        &self.payment_date
    }

    pub fn set_payment_date(&mut self, payment_date: &str) {
        if self.is_editing() {
            self.payment_date = payment_date.to_string();
        }
    }

    pub fn year_concerned(&self) -> &str {
        &self.year_concerned
    }

    pub fn set_year_concerned(&mut self, year_concerned: &str) {
        if self.is_editing() {
            self.year_concerned = year_concerned.to_string();
        }
    }

    fn form(&self) -> VersmentForm {
        VersmentForm::new(
            &self.amount,
            self.kind,
            &self.payment_date,
            &self.year_concerned,
        )
    }

    /// Validates the input and closes the dialog on success.
    ///
    /// On failure the dialog stays in [`DialogState::Editing`] and the error
    /// names the first problem found.
    pub fn confirm(&mut self) -> Result<(), FormError> {
        match self.state {
            DialogState::Editing => {}
            DialogState::Confirmed => return Ok(()),
            DialogState::Cancelled => return Err(FormError::DialogClosed),
        }

        let Some(client_id) = self.search.resolve().map(|item| item.client().id) else {
            log::debug!("Versment rejected: no client matches {:?}", self.search.text());
            return Err(FormError::InvalidClient);
        };
        let payload = self.form().parse().inspect_err(|err| {
            log::debug!("Versment rejected: {err}");
        })?;

        self.confirmation = Some(Confirmation {
            client_id,
            payload,
            at: Utc::now().naive_utc(),
        });
        self.state = DialogState::Confirmed;
        Ok(())
    }

    /// Dismisses the dialog. Has no effect once confirmed.
    pub fn cancel(&mut self) {
        if self.state == DialogState::Editing {
            self.state = DialogState::Cancelled;
        }
    }

    pub fn was_confirmed(&self) -> bool {
        self.state == DialogState::Confirmed
    }

    /// The record as it was confirmed, available only once confirmed.
    ///
    /// A record created through the dialog carries the confirmation time as
    /// `created_at`; an edited record keeps its identity and creation time.
    pub fn result(&self) -> Option<Versment> {
        let confirmation = self.confirmation.as_ref()?;
        let mut versment = confirmation
            .payload
            .clone()
            .into_versment(confirmation.client_id, self.original.clone());
        if self.original.is_none() {
            versment.created_at = Some(confirmation.at);
        }
        Some(versment)
    }
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;

    use super::*;
    use crate::dialog::client_search::InputKey;
    use crate::domain::types::{ClientId, NonEmptyString, VersmentId};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;

    fn client(id: i32, last: &str, first: Option<&str>) -> Client {
        Client {
            id: ClientId::new(id).unwrap(),
            last_name: last.to_string(),
            first_name: first.map(str::to_string),
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    fn clients() -> Vec<Client> {
        vec![client(1, "Doe", Some("John")), client(2, "Smith", Some("Ann"))]
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn filled_dialog() -> VersmentDialog {
        let mut dialog = VersmentDialog::new(clients(), None, today());
        dialog.search_mut().on_key_released("smith", InputKey::Edit);
        dialog.search_mut().select(0);
        dialog.set_amount("12.5");
        dialog.set_kind(Some(VersmentType::Avance));
        dialog.set_payment_date("2024-03-01");
        dialog.set_year_concerned("2024");
        dialog
    }

    fn stored_versment() -> Versment {
        let mut versment = Versment::new(
            ClientId::new(1).unwrap(),
            "300.00".parse::<BigDecimal>().unwrap(),
            VersmentType::Remboursement,
            NaiveDate::from_ymd_opt(2023, 11, 2).unwrap(),
            NonEmptyString::new("2023").unwrap(),
        );
        versment.id = Some(VersmentId::new(17).unwrap());
        versment.created_at = NaiveDate::from_ymd_opt(2023, 11, 2)
            .unwrap()
            .and_hms_opt(9, 30, 0);
        versment
    }

    #[test]
    fn create_mode_defaults() {
        let dialog = VersmentDialog::new(clients(), None, today());
        assert_eq!(dialog.state(), DialogState::Editing);
        assert_eq!(dialog.payment_date(), "2024-06-15");
        assert_eq!(dialog.year_concerned(), "2024");
        assert_eq!(dialog.kind(), Some(VersmentType::Honoraires));
        assert_eq!(dialog.amount(), "");
        assert_eq!(dialog.search().candidates().count(), 2);
    }

    #[test]
    fn confirmed_entry_builds_record() {
        let mut dialog = filled_dialog();

        dialog.confirm().unwrap();
        assert!(dialog.was_confirmed());

        let versment = dialog.result().unwrap();
        assert_eq!(versment.id, None);
        assert_eq!(versment.client_id.get(), 2);
        assert_eq!(versment.amount, "12.5".parse::<BigDecimal>().unwrap());
        assert_eq!(versment.kind, VersmentType::Avance);
        assert_eq!(
            versment.payment_date,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(versment.year_concerned.as_str(), "2024");
        assert!(versment.created_at.is_some());
    }

    #[test]
    fn result_is_stable_across_calls() {
        let mut dialog = filled_dialog();
        dialog.confirm().unwrap();
        assert_eq!(dialog.result(), dialog.result());
    }

    #[test]
    fn confirmed_record_ignores_later_edits() {
        let mut dialog = filled_dialog();
        dialog.confirm().unwrap();
        let confirmed = dialog.result().unwrap();

        dialog.set_amount("999");
        dialog.set_kind(None);
        dialog.set_payment_date("");
        assert!(!dialog.type_amount_char('7'));
        dialog.search_mut().set_query("x");

        assert!(dialog.was_confirmed());
        assert_eq!(dialog.amount(), "12.5");
        let versment = dialog.result().unwrap();
        assert_eq!(versment.amount, confirmed.amount);
        assert_eq!(versment.kind, VersmentType::Avance);
        assert_eq!(versment.client_id.get(), 2);
        assert_eq!(versment.created_at, confirmed.created_at);
    }

    #[test]
    fn wide_amounts_keep_every_digit() {
        for typed in [
            "123456789012345678901234567890.50",
            "0.123456789012345678901234567891234",
        ] {
            let mut dialog = filled_dialog();
            dialog.set_amount(typed);

            dialog.confirm().unwrap();

            let versment = dialog.result().unwrap();
            assert_eq!(versment.amount, typed.parse::<BigDecimal>().unwrap());
            assert_eq!(versment.amount.to_string(), typed);
        }
    }

    #[test]
    fn missing_amount_keeps_editing() {
        let mut dialog = filled_dialog();
        dialog.set_amount("");

        let err = dialog.confirm().unwrap_err();

        assert!(matches!(err, FormError::AmountRequired));
        assert_eq!(dialog.state(), DialogState::Editing);
        assert!(dialog.result().is_none());
    }

    #[test]
    fn slash_date_is_rejected() {
        let mut dialog = filled_dialog();
        dialog.set_payment_date("03/01/2024");

        let err = dialog.confirm().unwrap_err();

        assert!(matches!(err, FormError::InvalidDate));
        assert!(!dialog.was_confirmed());
    }

    #[test]
    fn client_is_checked_first() {
        let mut dialog = VersmentDialog::new(clients(), None, today());
        dialog.search_mut().set_query("nobody");
        dialog.set_amount("");

        let err = dialog.confirm().unwrap_err();

        assert!(matches!(err, FormError::InvalidClient));
        assert_eq!(err.to_string(), "no valid client selected");
    }

    #[test]
    fn typed_label_is_auto_resolved() {
        let mut dialog = filled_dialog();
        dialog.search_mut().set_query("DOE JOHN (1)");
        assert!(dialog.search().selected().is_none());

        dialog.confirm().unwrap();

        assert_eq!(dialog.result().unwrap().client_id.get(), 1);
    }

    #[test]
    fn missing_type_is_rejected() {
        let mut dialog = filled_dialog();
        dialog.set_kind(None);
        assert!(matches!(dialog.confirm(), Err(FormError::TypeRequired)));
    }

    #[test]
    fn errors_can_be_corrected() {
        let mut dialog = filled_dialog();
        dialog.set_amount("12,5");
        assert!(matches!(dialog.confirm(), Err(FormError::InvalidAmount)));

        dialog.set_amount("12.5");
        dialog.confirm().unwrap();
        assert!(dialog.was_confirmed());
    }

    #[test]
    fn cancelled_dialog_produces_nothing() {
        let mut dialog = filled_dialog();
        dialog.cancel();

        assert_eq!(dialog.state(), DialogState::Cancelled);
        assert!(!dialog.was_confirmed());
        assert!(dialog.result().is_none());
        assert!(matches!(dialog.confirm(), Err(FormError::DialogClosed)));
    }

    #[test]
    fn cancel_after_confirm_is_ignored() {
        let mut dialog = filled_dialog();
        dialog.confirm().unwrap();
        dialog.cancel();
        assert!(dialog.was_confirmed());
    }

    #[test]
    fn edit_mode_populates_fields() {
        let dialog = VersmentDialog::new(clients(), Some(stored_versment()), today());

        assert_eq!(dialog.search().text(), "Doe John (1)");
        assert_eq!(dialog.amount(), "300.00");
        assert_eq!(dialog.kind(), Some(VersmentType::Remboursement));
        assert_eq!(dialog.payment_date(), "2023-11-02");
        assert_eq!(dialog.year_concerned(), "2023");
    }

    #[test]
    fn edit_mode_keeps_identity_and_creation_time() {
        let stored = stored_versment();
        let mut dialog = VersmentDialog::new(clients(), Some(stored.clone()), today());
        dialog.set_amount("310");

        dialog.confirm().unwrap();
        let versment = dialog.result().unwrap();

        assert_eq!(versment.id, stored.id);
        assert_eq!(versment.created_at, stored.created_at);
        assert_eq!(versment.amount, BigDecimal::from(310));
    }

    #[test]
    fn amount_typing_filters_characters() {
        let mut dialog = VersmentDialog::new(clients(), None, today());
        for c in "1a2.-5".chars() {
            dialog.type_amount_char(c);
        }
        assert_eq!(dialog.amount(), "12.5");

        assert!(dialog.type_amount_char('\u{8}'));
        assert_eq!(dialog.amount(), "12.");
    }

    #[test]
    fn open_loads_clients_from_the_directory() {
        let mut repo = MockRepository::new();
        repo.expect_list_clients()
            .times(1)
            .returning(|| Ok(clients()));

        let dialog = VersmentDialog::open(&repo, None).unwrap();

        assert_eq!(dialog.search().candidates().count(), 2);
    }

    #[test]
    fn open_reports_directory_failures() {
        let mut repo = MockRepository::new();
        repo.expect_list_clients()
            .returning(|| Err(RepositoryError::Connection("locked".to_string())));

        let result = VersmentDialog::open(&repo, None);

        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }
}
