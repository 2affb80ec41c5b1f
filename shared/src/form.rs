//! # Booking form model
//!
//! The in-progress form state the UI edits, the validation rules applied on
//! every change, and the list/add/edit view state machine. Everything here is
//! free of browser types so it can be exercised by plain unit tests.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Booking, BookingPayload};

static MOBILE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid mobile regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

const MIN_APPLICANT_NAME_LEN: usize = 3;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Form fields in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BookingField {
    ApplicantName,
    MobileNo,
    Email,
    HallName,
    Purpose,
    Rent,
    AdditionalCharges,
    Total,
    ReceiptNo,
    ReceiptDate,
    Remark,
}

impl BookingField {
    pub const ALL: [BookingField; 11] = [
        BookingField::ApplicantName,
        BookingField::MobileNo,
        BookingField::Email,
        BookingField::HallName,
        BookingField::Purpose,
        BookingField::Rent,
        BookingField::AdditionalCharges,
        BookingField::Total,
        BookingField::ReceiptNo,
        BookingField::ReceiptDate,
        BookingField::Remark,
    ];

    /// Wire name, also used as the input's `name` attribute
    pub fn name(self) -> &'static str {
        match self {
            BookingField::ApplicantName => "applicantName",
            BookingField::MobileNo => "mobileNo",
            BookingField::Email => "email",
            BookingField::HallName => "hallName",
            BookingField::Purpose => "purpose",
            BookingField::Rent => "rent",
            BookingField::AdditionalCharges => "additionalCharges",
            BookingField::Total => "total",
            BookingField::ReceiptNo => "receiptNo",
            BookingField::ReceiptDate => "receiptDate",
            BookingField::Remark => "remark",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BookingField::ApplicantName => "Applicant Name",
            BookingField::MobileNo => "Mobile No",
            BookingField::Email => "Email",
            BookingField::HallName => "Hall Name",
            BookingField::Purpose => "Purpose",
            BookingField::Rent => "Rent",
            BookingField::AdditionalCharges => "Additional Charges",
            BookingField::Total => "Total Amount",
            BookingField::ReceiptNo => "Receipt No",
            BookingField::ReceiptDate => "Receipt Date",
            BookingField::Remark => "Remark",
        }
    }

    /// HTML input type
    pub fn input_type(self) -> &'static str {
        match self {
            BookingField::Email => "email",
            BookingField::Rent | BookingField::AdditionalCharges | BookingField::Total => "number",
            BookingField::ReceiptDate => "date",
            _ => "text",
        }
    }

    /// Whether the user must fill the field in; the derived total is not entered
    pub fn is_required(self) -> bool {
        !matches!(
            self,
            BookingField::AdditionalCharges | BookingField::Remark | BookingField::Total
        )
    }

    /// Total is always derived; the receipt number is frozen once created
    pub fn is_read_only(self, mode: ViewMode) -> bool {
        match self {
            BookingField::Total => true,
            BookingField::ReceiptNo => mode == ViewMode::Edit,
            _ => false,
        }
    }
}

/// Field name → error message for every rule the form currently breaks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<BookingField, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: BookingField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    fn insert(&mut self, field: BookingField, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

/// Parse a numeric input, treating blank or unparsable text as absent
fn parse_amount(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// rent + additional charges, with missing or invalid inputs counted as 0
pub fn compute_total(rent: &str, additional_charges: &str) -> f64 {
    parse_amount(rent).unwrap_or(0.0) + parse_amount(additional_charges).unwrap_or(0.0)
}

/// Raw text of every input, as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingForm {
    pub applicant_name: String,
    pub mobile_no: String,
    pub email: String,
    pub hall_name: String,
    pub purpose: String,
    pub rent: String,
    pub additional_charges: String,
    pub total: f64,
    pub receipt_no: String,
    pub receipt_date: String,
    pub remark: String,
}

impl BookingForm {
    /// Pre-fill the form from a stored booking for editing
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            applicant_name: booking.applicant_name.clone(),
            mobile_no: booking.mobile_no.clone(),
            email: booking.email.clone(),
            hall_name: booking.hall_name.clone(),
            purpose: booking.purpose.clone(),
            rent: booking.rent.to_string(),
            additional_charges: booking
                .additional_charges
                .map(|charges| charges.to_string())
                .unwrap_or_default(),
            total: booking.total,
            receipt_no: booking.receipt_no.clone(),
            receipt_date: booking.receipt_date.format(DATE_FORMAT).to_string(),
            remark: booking.remark.clone().unwrap_or_default(),
        }
    }

    /// Current text of a field
    pub fn value(&self, field: BookingField) -> String {
        match field {
            BookingField::ApplicantName => self.applicant_name.clone(),
            BookingField::MobileNo => self.mobile_no.clone(),
            BookingField::Email => self.email.clone(),
            BookingField::HallName => self.hall_name.clone(),
            BookingField::Purpose => self.purpose.clone(),
            BookingField::Rent => self.rent.clone(),
            BookingField::AdditionalCharges => self.additional_charges.clone(),
            BookingField::Total => self.total.to_string(),
            BookingField::ReceiptNo => self.receipt_no.clone(),
            BookingField::ReceiptDate => self.receipt_date.clone(),
            BookingField::Remark => self.remark.clone(),
        }
    }

    /// Store new input text and recompute the total.
    ///
    /// Writes to `Total` are discarded since it is always derived.
    pub fn set(&mut self, field: BookingField, value: String) {
        match field {
            BookingField::ApplicantName => self.applicant_name = value,
            BookingField::MobileNo => self.mobile_no = value,
            BookingField::Email => self.email = value,
            BookingField::HallName => self.hall_name = value,
            BookingField::Purpose => self.purpose = value,
            BookingField::Rent => self.rent = value,
            BookingField::AdditionalCharges => self.additional_charges = value,
            BookingField::Total => {}
            BookingField::ReceiptNo => self.receipt_no = value,
            BookingField::ReceiptDate => self.receipt_date = value,
            BookingField::Remark => self.remark = value,
        }
        self.total = compute_total(&self.rent, &self.additional_charges);
    }

    /// Check every rule against the current input; `today` bounds the receipt date
    pub fn validate(&self, today: NaiveDate) -> FieldErrors {
        let mut errors = FieldErrors::default();

        if self.applicant_name.chars().count() < MIN_APPLICANT_NAME_LEN {
            errors.insert(BookingField::ApplicantName, "Minimum 3 characters required");
        }

        if !MOBILE_RE.is_match(&self.mobile_no) {
            errors.insert(BookingField::MobileNo, "Mobile number must be 10 digits");
        }

        if !EMAIL_RE.is_match(&self.email) {
            errors.insert(BookingField::Email, "Invalid email format");
        }

        if self.hall_name.is_empty() {
            errors.insert(BookingField::HallName, "Hall name is required");
        }
        if self.purpose.is_empty() {
            errors.insert(BookingField::Purpose, "Purpose is required");
        }

        match parse_amount(&self.rent) {
            Some(rent) if rent >= 0.0 => {}
            _ => errors.insert(BookingField::Rent, "Rent must be a positive number"),
        }

        if !self.additional_charges.trim().is_empty() {
            match parse_amount(&self.additional_charges) {
                Some(charges) if charges >= 0.0 => {}
                _ => errors.insert(BookingField::AdditionalCharges, "Charges cannot be negative"),
            }
        }

        if self.receipt_no.is_empty() {
            errors.insert(BookingField::ReceiptNo, "Receipt number is required");
        }

        if self.receipt_date.is_empty() {
            errors.insert(BookingField::ReceiptDate, "Receipt date is required");
        } else {
            match NaiveDate::parse_from_str(&self.receipt_date, DATE_FORMAT) {
                Ok(date) if date > today => {
                    errors.insert(BookingField::ReceiptDate, "Receipt date cannot be in the future")
                }
                Ok(_) => {}
                Err(_) => errors.insert(BookingField::ReceiptDate, "Invalid receipt date"),
            }
        }

        errors
    }

    /// Convert the form into a request body. Blank optional inputs become `None`.
    pub fn to_payload(&self) -> BookingPayload {
        let optional = |text: &str| (!text.trim().is_empty()).then(|| text.to_string());

        BookingPayload {
            mobile_no: Some(self.mobile_no.clone()),
            hall_name: Some(self.hall_name.clone()),
            applicant_name: Some(self.applicant_name.clone()),
            email: Some(self.email.clone()),
            purpose: Some(self.purpose.clone()),
            rent: parse_amount(&self.rent),
            additional_charges: parse_amount(&self.additional_charges),
            total: Some(self.total),
            remark: optional(&self.remark),
            receipt_no: Some(self.receipt_no.clone()),
            receipt_date: NaiveDate::parse_from_str(&self.receipt_date, DATE_FORMAT).ok(),
        }
    }
}

/// Which screen the UI shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    Add,
    Edit,
}

/// Write the UI should send after a successful validation
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAction {
    Create(BookingPayload),
    Update(i64, BookingPayload),
}

/// List/add/edit state machine driving the booking screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingEditor {
    mode: ViewMode,
    form: BookingForm,
    errors: FieldErrors,
    editing_id: Option<i64>,
}

impl BookingEditor {
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn editing_id(&self) -> Option<i64> {
        self.editing_id
    }

    /// list → add with an empty form
    pub fn start_add(&mut self) {
        *self = Self {
            mode: ViewMode::Add,
            ..Self::default()
        };
    }

    /// list → edit, pre-filled from `booking`
    pub fn start_edit(&mut self, booking: &Booking) {
        *self = Self {
            mode: ViewMode::Edit,
            form: BookingForm::from_booking(booking),
            errors: FieldErrors::default(),
            editing_id: Some(booking.id),
        };
    }

    /// add/edit → list, discarding the form. Also used after a successful write.
    pub fn back(&mut self) {
        *self = Self::default();
    }

    /// Apply an input change and re-run validation
    pub fn change(&mut self, field: BookingField, value: String, today: NaiveDate) {
        if self.mode == ViewMode::List || field.is_read_only(self.mode) {
            return;
        }
        self.form.set(field, value);
        self.errors = self.form.validate(today);
    }

    pub fn can_submit(&self) -> bool {
        self.mode != ViewMode::List && self.errors.is_empty()
    }

    /// Validate once more and build the write to send.
    ///
    /// Returns `None` and records the errors when the form is invalid. Updates
    /// never carry the receipt number.
    pub fn submit(&mut self, today: NaiveDate) -> Option<SubmitAction> {
        self.errors = self.form.validate(today);
        if !self.errors.is_empty() {
            return None;
        }

        let mut payload = self.form.to_payload();
        match (self.mode, self.editing_id) {
            (ViewMode::Add, _) => Some(SubmitAction::Create(payload)),
            (ViewMode::Edit, Some(id)) => {
                payload.receipt_no = None;
                Some(SubmitAction::Update(id, payload))
            }
            _ => None,
        }
    }

    /// Id to delete, only available while editing
    pub fn delete_target(&self) -> Option<i64> {
        match self.mode {
            ViewMode::Edit => self.editing_id,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn valid_form() -> BookingForm {
        let mut form = BookingForm::default();
        form.set(BookingField::ApplicantName, "Ravi Kumar".to_string());
        form.set(BookingField::MobileNo, "1234567890".to_string());
        form.set(BookingField::Email, "ravi@example.com".to_string());
        form.set(BookingField::HallName, "Community Hall".to_string());
        form.set(BookingField::Purpose, "Birthday".to_string());
        form.set(BookingField::Rent, "1500".to_string());
        form.set(BookingField::AdditionalCharges, "200.5".to_string());
        form.set(BookingField::ReceiptNo, "RC-42".to_string());
        form.set(BookingField::ReceiptDate, "2025-06-15".to_string());
        form
    }

    fn stored_booking() -> Booking {
        Booking {
            id: 3,
            mobile_no: "1234567890".to_string(),
            hall_name: "Main Hall".to_string(),
            applicant_name: "Meera".to_string(),
            email: "meera@example.com".to_string(),
            purpose: "Seminar".to_string(),
            rent: 1000.0,
            additional_charges: None,
            total: 1000.0,
            remark: Some("AC required".to_string()),
            receipt_no: "RC-7".to_string(),
            receipt_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(valid_form().validate(today()).is_empty());
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let errors = BookingForm::default().validate(today());
        for field in BookingField::ALL {
            assert_eq!(errors.get(field).is_some(), field.is_required(), "field {:?}", field);
        }
    }

    #[test]
    fn test_total_is_rent_plus_charges() {
        let form = valid_form();
        assert_eq!(form.total, 1700.5);

        assert_eq!(compute_total("100", ""), 100.0);
        assert_eq!(compute_total("100", "abc"), 100.0);
        assert_eq!(compute_total("", "25"), 25.0);
        assert_eq!(compute_total("x", "y"), 0.0);
        assert_eq!(compute_total(" 10 ", "2.5"), 12.5);
        assert_eq!(compute_total("NaN", "5"), 5.0);
    }

    #[test]
    fn test_total_tracks_every_edit() {
        let mut form = valid_form();
        form.set(BookingField::Rent, "2000".to_string());
        assert_eq!(form.total, 2200.5);
        form.set(BookingField::AdditionalCharges, String::new());
        assert_eq!(form.total, 2000.0);
        form.set(BookingField::Total, "99999".to_string());
        assert_eq!(form.total, 2000.0);
    }

    #[test]
    fn test_mobile_number_rule() {
        let mut form = valid_form();
        form.set(BookingField::MobileNo, "12345".to_string());
        assert_eq!(
            form.validate(today()).get(BookingField::MobileNo),
            Some("Mobile number must be 10 digits")
        );

        form.set(BookingField::MobileNo, "12345678901".to_string());
        assert!(form.validate(today()).get(BookingField::MobileNo).is_some());

        form.set(BookingField::MobileNo, "12345abcde".to_string());
        assert!(form.validate(today()).get(BookingField::MobileNo).is_some());

        form.set(BookingField::MobileNo, "1234567890".to_string());
        assert!(form.validate(today()).get(BookingField::MobileNo).is_none());
    }

    #[test]
    fn test_email_rule() {
        let mut form = valid_form();
        for bad in ["a@b", "ab.com", "a b@c.com", "a@@b.com", ""] {
            form.set(BookingField::Email, bad.to_string());
            assert_eq!(
                form.validate(today()).get(BookingField::Email),
                Some("Invalid email format"),
                "{bad}"
            );
        }

        form.set(BookingField::Email, "a@b.com".to_string());
        assert!(form.validate(today()).get(BookingField::Email).is_none());
    }

    #[test]
    fn test_applicant_name_rule() {
        let mut form = valid_form();
        form.set(BookingField::ApplicantName, "Al".to_string());
        assert_eq!(
            form.validate(today()).get(BookingField::ApplicantName),
            Some("Minimum 3 characters required")
        );
        form.set(BookingField::ApplicantName, "Ali".to_string());
        assert!(form.validate(today()).is_empty());
    }

    #[test]
    fn test_amount_rules() {
        let mut form = valid_form();
        form.set(BookingField::Rent, "-1".to_string());
        assert_eq!(
            form.validate(today()).get(BookingField::Rent),
            Some("Rent must be a positive number")
        );
        form.set(BookingField::Rent, String::new());
        assert!(form.validate(today()).get(BookingField::Rent).is_some());
        form.set(BookingField::Rent, "0".to_string());
        assert!(form.validate(today()).get(BookingField::Rent).is_none());

        form.set(BookingField::AdditionalCharges, "-5".to_string());
        assert_eq!(
            form.validate(today()).get(BookingField::AdditionalCharges),
            Some("Charges cannot be negative")
        );
        form.set(BookingField::AdditionalCharges, String::new());
        assert!(form.validate(today()).is_empty());
    }

    #[test]
    fn test_receipt_date_rule() {
        let mut form = valid_form();

        form.set(BookingField::ReceiptDate, "2025-06-16".to_string());
        assert_eq!(
            form.validate(today()).get(BookingField::ReceiptDate),
            Some("Receipt date cannot be in the future")
        );

        form.set(BookingField::ReceiptDate, "2025-06-15".to_string());
        assert!(form.validate(today()).get(BookingField::ReceiptDate).is_none());

        form.set(BookingField::ReceiptDate, "2024-01-01".to_string());
        assert!(form.validate(today()).get(BookingField::ReceiptDate).is_none());

        form.set(BookingField::ReceiptDate, "15/06/2025".to_string());
        assert_eq!(
            form.validate(today()).get(BookingField::ReceiptDate),
            Some("Invalid receipt date")
        );

        form.set(BookingField::ReceiptDate, String::new());
        assert_eq!(
            form.validate(today()).get(BookingField::ReceiptDate),
            Some("Receipt date is required")
        );
    }

    #[test]
    fn test_payload_from_form() {
        let payload = valid_form().to_payload();
        assert_eq!(payload.rent, Some(1500.0));
        assert_eq!(payload.additional_charges, Some(200.5));
        assert_eq!(payload.total, Some(1700.5));
        assert_eq!(payload.remark, None);
        assert_eq!(payload.receipt_date, Some(today()));
    }

    #[test]
    fn test_clearing_optional_fields_in_edit_sends_null() {
        let mut booking = stored_booking();
        booking.additional_charges = Some(250.0);
        booking.total = 1250.0;

        let mut editor = BookingEditor::default();
        editor.start_edit(&booking);
        editor.change(BookingField::AdditionalCharges, String::new(), today());
        editor.change(BookingField::Remark, String::new(), today());

        let Some(SubmitAction::Update(_, payload)) = editor.submit(today()) else {
            panic!("edit should submit an update");
        };
        assert_eq!(payload.total, Some(1000.0));

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value.get("additionalCharges"), Some(&serde_json::Value::Null));
        assert_eq!(value.get("remark"), Some(&serde_json::Value::Null));
        assert!(value.get("receiptNo").is_none());
    }

    #[test]
    fn test_form_round_trips_stored_booking() {
        let booking = stored_booking();
        let form = BookingForm::from_booking(&booking);
        assert_eq!(form.rent, "1000");
        assert_eq!(form.additional_charges, "");
        assert_eq!(form.receipt_date, "2025-06-01");
        assert_eq!(form.remark, "AC required");
        assert!(form.validate(today()).is_empty());
    }

    #[test]
    fn test_submit_blocked_exactly_when_errors_present() {
        let mut editor = BookingEditor::default();
        editor.start_add();
        assert!(editor.can_submit());

        editor.change(BookingField::MobileNo, "123".to_string(), today());
        assert!(!editor.errors().is_empty());
        assert!(!editor.can_submit());
        assert_eq!(editor.submit(today()), None);

        let form = valid_form();
        for field in BookingField::ALL {
            editor.change(field, form.value(field), today());
        }
        assert!(editor.errors().is_empty());
        assert!(editor.can_submit());
        assert!(matches!(editor.submit(today()), Some(SubmitAction::Create(_))));
    }

    #[test]
    fn test_submit_on_fresh_add_form_surfaces_errors() {
        let mut editor = BookingEditor::default();
        editor.start_add();
        assert_eq!(editor.submit(today()), None);
        assert!(editor.errors().get(BookingField::ReceiptNo).is_some());
        assert!(!editor.can_submit());
    }

    #[test]
    fn test_edit_mode_freezes_receipt_number() {
        let mut editor = BookingEditor::default();
        editor.start_edit(&stored_booking());
        assert_eq!(editor.mode(), ViewMode::Edit);
        assert_eq!(editor.delete_target(), Some(3));

        editor.change(BookingField::ReceiptNo, "RC-8".to_string(), today());
        assert_eq!(editor.form().receipt_no, "RC-7");

        editor.change(BookingField::HallName, "Annex".to_string(), today());
        match editor.submit(today()) {
            Some(SubmitAction::Update(id, payload)) => {
                assert_eq!(id, 3);
                assert_eq!(payload.hall_name.as_deref(), Some("Annex"));
                assert_eq!(payload.receipt_no, None);
            }
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn test_view_mode_transitions() {
        let mut editor = BookingEditor::default();
        assert_eq!(editor.mode(), ViewMode::List);
        assert_eq!(editor.delete_target(), None);
        assert!(!editor.can_submit());

        editor.change(BookingField::HallName, "ignored".to_string(), today());
        assert_eq!(editor.form().hall_name, "");

        editor.start_add();
        assert_eq!(editor.mode(), ViewMode::Add);
        assert_eq!(editor.delete_target(), None);
        editor.change(BookingField::HallName, "Hall".to_string(), today());

        editor.back();
        assert_eq!(editor, BookingEditor::default());

        editor.start_edit(&stored_booking());
        assert_eq!(editor.editing_id(), Some(3));
        editor.back();
        assert_eq!(editor.mode(), ViewMode::List);
        assert_eq!(editor.editing_id(), None);
    }

    #[test]
    fn test_read_only_fields() {
        assert!(BookingField::Total.is_read_only(ViewMode::Add));
        assert!(!BookingField::ReceiptNo.is_read_only(ViewMode::Add));
        assert!(BookingField::ReceiptNo.is_read_only(ViewMode::Edit));
        assert!(!BookingField::HallName.is_read_only(ViewMode::Edit));
    }
}
