//! The four-step booking wizard.
//!
//! All flow state lives in one [`Wizard`] value and only changes through its
//! methods, so a screen can never observe half of a transition.
//!
//! Steps:
//! 1. pick a date and a slot (guarded: both set, not in the past)
//! 2. contact details and the yes/no question (free navigation)
//! 3. questionnaire; "Submit" on the last question books the meeting
//! 4. confirmation (terminal)

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

use crate::booking::{BookingStatus, MeetingRequest, MeetingService, SUBMIT_FAILED};
use crate::contact::{ContactField, ContactInfo};
use crate::error::{SlotbookError, SlotbookResult};
use crate::questionnaire::{QuestionBack, Questionnaire};
use crate::slot::{Appointment, TimeSlot};
use crate::time_zone::{TimeZoneEntry, TimeZonePicker};

pub const DATE_REQUIRED: &str = "Please select a date.";
pub const SLOT_REQUIRED: &str = "Please select a time slot.";
pub const FUTURE_REQUIRED: &str = "Please select a date and time in the future.";
pub const TIME_ZONE_REQUIRED: &str = "Please select a time zone.";

/// Body of the blocking warning shown for any step-1 error.
pub const WARNING_TEXT: &str = "Please select time and slot to continue";

pub const CONSENT_QUESTION: &str = "Any experience with handling Financial Operations on Cloud";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Schedule = 1,
    Details = 2,
    Questionnaire = 3,
    Confirmation = 4,
}

impl Step {
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Schedule => "Select a Date and Time",
            Step::Details => "Enter your details",
            Step::Questionnaire => "Help us make your experience better",
            Step::Confirmation => "We just scheduled a demo with you!",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/4 {}", self.number(), self.title())
    }
}

/// Step-1 guard messages. Empty means no error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepErrors {
    pub date_error: String,
    pub slot_error: String,
    pub future_date_error: String,
}

impl StepErrors {
    pub fn is_empty(&self) -> bool {
        self.date_error.is_empty() && self.slot_error.is_empty() && self.future_date_error.is_empty()
    }

    /// Non-empty messages in display order.
    pub fn messages(&self) -> Vec<&str> {
        [&self.date_error, &self.slot_error, &self.future_date_error]
            .into_iter()
            .filter(|m| !m.is_empty())
            .map(String::as_str)
            .collect()
    }
}

/// Answer to the yes/no question on the details step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consent {
    Yes,
    No,
}

/// What the confirmation screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// "20 October 2026"
    pub date: String,
    pub slot: String,
}

/// Result of pressing "Submit" on the last question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The service accepted the booking; the wizard is on step 4.
    Booked,
    /// The request went out and failed; see [`BookingStatus::error`].
    Failed,
    /// The form did not pass the submit gate; nothing was sent.
    Blocked(Vec<ContactField>),
}

#[derive(Debug, Clone)]
pub struct Wizard {
    step: Step,
    errors: StepErrors,
    appointment: Appointment,
    time_zone: TimeZonePicker,
    contact: ContactInfo,
    consent: Option<Consent>,
    questionnaire: Questionnaire,
    booking: BookingStatus,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Wizard {
            step: Step::Schedule,
            errors: StepErrors::default(),
            appointment: Appointment::new(),
            time_zone: TimeZonePicker::new(),
            contact: ContactInfo::new(),
            consent: None,
            questionnaire: Questionnaire::new(),
            booking: BookingStatus::default(),
        }
    }

    // --- Read access ---

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn errors(&self) -> &StepErrors {
        &self.errors
    }

    /// A step-1 guard failed and the warning is up.
    pub fn has_blocking_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn appointment(&self) -> &Appointment {
        &self.appointment
    }

    pub fn time_zone(&self) -> &TimeZonePicker {
        &self.time_zone
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn consent(&self) -> Option<Consent> {
        self.consent
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn booking(&self) -> &BookingStatus {
        &self.booking
    }

    // --- Input ---

    pub fn select_date(&mut self, date: NaiveDate, today: NaiveDate) -> SlotbookResult<()> {
        self.appointment.select_date(date, today)
    }

    pub fn select_slot(&mut self, label: &str) -> SlotbookResult<()> {
        self.appointment.select_slot(label)
    }

    pub fn toggle_time_zones(&mut self) {
        self.time_zone.toggle();
    }

    pub fn select_time_zone(&mut self, entry: &TimeZoneEntry) {
        self.time_zone.select_entry(entry);
    }

    pub fn set_contact_field(&mut self, field: ContactField, value: impl Into<String>) {
        self.contact.set(field, value.into());
    }

    pub fn set_consent(&mut self, consent: Consent) {
        self.consent = Some(consent);
    }

    pub fn toggle_answer(&mut self, question_id: u32, option: &str) {
        self.questionnaire.toggle(question_id, option);
    }

    // --- Navigation ---

    /// "Next" on step 1. Checks, in order, that a date is picked, that a slot
    /// is picked, and that the appointment does not start before `now`; the
    /// first failure is recorded and the step stays put. On success all
    /// three messages are cleared together.
    pub fn next_from_schedule(&mut self, now: DateTime<Utc>) -> bool {
        if self.step != Step::Schedule {
            return false;
        }

        let Some(date) = self.appointment.date() else {
            self.errors.date_error = DATE_REQUIRED.to_string();
            tracing::debug!("schedule guard: no date");
            return false;
        };
        let Some(slot) = self.appointment.slot() else {
            self.errors.slot_error = SLOT_REQUIRED.to_string();
            tracing::debug!("schedule guard: no slot");
            return false;
        };

        if self.start_instant(date, slot) < Some(now) {
            self.errors.future_date_error = FUTURE_REQUIRED.to_string();
            tracing::debug!(%date, slot, "schedule guard: in the past");
            return false;
        }

        self.errors = StepErrors::default();
        self.go_to(Step::Details);
        true
    }

    /// Start of the picked appointment as an instant. Uses the chosen zone
    /// when there is one, the system's local clock otherwise. `None` when the
    /// slot cannot be placed.
    fn start_instant(&self, date: NaiveDate, slot: &str) -> Option<DateTime<Utc>> {
        let slot = TimeSlot::parse(slot).ok()?;
        match self.time_zone.tz() {
            Ok(tz) => crate::slot::zoned_start(date, &slot, tz)
                .ok()
                .map(|start| start.with_timezone(&Utc)),
            Err(_) => Local
                .from_local_datetime(&date.and_time(slot.time()))
                .earliest()
                .map(|start| start.with_timezone(&Utc)),
        }
    }

    /// "Next" on step 2. Contact fields are only checked at submit time.
    pub fn forward(&mut self) -> bool {
        if self.step != Step::Details {
            return false;
        }
        self.go_to(Step::Questionnaire);
        true
    }

    /// "Back" on steps 2 and 3. Inside the questionnaire this moves one
    /// question back, and leaves for step 2 only from the first question.
    pub fn back(&mut self) -> bool {
        match self.step {
            Step::Details => {
                self.go_to(Step::Schedule);
                true
            }
            Step::Questionnaire => {
                if self.questionnaire.back() == QuestionBack::LeaveQuestionnaire {
                    self.go_to(Step::Details);
                }
                true
            }
            Step::Schedule | Step::Confirmation => false,
        }
    }

    /// "Next" inside the questionnaire.
    pub fn question_next(&mut self) -> bool {
        self.step == Step::Questionnaire && self.questionnaire.next()
    }

    /// Acknowledge the step-1 warning. This is a hard reset: everything
    /// entered so far is discarded and the wizard starts over on step 1.
    pub fn dismiss_error(&mut self) {
        tracing::debug!("warning dismissed, restarting wizard");
        *self = Wizard::new();
    }

    // --- Submission ---

    /// Run the submit gate and, if it passes, mark a request as in flight and
    /// return it. `Ok(None)` means the gate failed and error flags were set.
    ///
    /// Fails with [`SlotbookError::SubmissionInFlight`] while a previous
    /// request has not been finished.
    pub fn begin_submission(&mut self) -> SlotbookResult<Option<MeetingRequest>> {
        if self.booking.loading {
            return Err(SlotbookError::SubmissionInFlight);
        }
        let request = self.build_request()?;
        if request.is_some() {
            self.booking.start();
        }
        Ok(request)
    }

    /// The submit gate on its own: the request that "Submit" would send,
    /// without marking anything in flight. The previous attempt's result is
    /// cleared first.
    pub fn build_request(&mut self) -> SlotbookResult<Option<MeetingRequest>> {
        if self.step != Step::Questionnaire || !self.questionnaire.is_last() {
            return Err(SlotbookError::NotReady(format!(
                "submit is only offered on the last question (at {})",
                self.step
            )));
        }
        self.booking.clear_result();

        let invalid = self.contact.flag_invalid();
        let (Some(date), Some(slot)) = (self.appointment.date(), self.appointment.slot()) else {
            tracing::debug!("submit gate: no date or slot");
            return Ok(None);
        };
        if !invalid.is_empty() {
            tracing::debug!(?invalid, "submit gate: invalid contact fields");
            return Ok(None);
        }

        let tz = match self.time_zone.tz() {
            Ok(tz) => tz,
            Err(e) => {
                tracing::debug!(error = %e, "submit gate: no usable time zone");
                self.booking.fail(TIME_ZONE_REQUIRED);
                return Ok(None);
            }
        };

        let slot = TimeSlot::parse(slot)?;
        let start = crate::slot::zoned_start(date, &slot, tz)?;
        Ok(Some(MeetingRequest::new(self.contact.email(), &start)))
    }

    /// Record the result of the request handed out by
    /// [`begin_submission`](Self::begin_submission).
    pub fn finish_submission(&mut self, result: SlotbookResult<()>) -> SubmitOutcome {
        match result {
            Ok(()) => {
                self.booking.succeed();
                self.go_to(Step::Confirmation);
                SubmitOutcome::Booked
            }
            Err(e) => {
                tracing::warn!(error = %e, "booking failed");
                self.booking.fail(SUBMIT_FAILED);
                SubmitOutcome::Failed
            }
        }
    }

    /// "Submit" on the last question: gate, one request, result.
    pub async fn submit<S: MeetingService>(&mut self, service: &S) -> SlotbookResult<SubmitOutcome> {
        let Some(request) = self.begin_submission()? else {
            let invalid = ContactField::ALL
                .into_iter()
                .filter(|f| self.contact.field(*f).error)
                .collect();
            return Ok(SubmitOutcome::Blocked(invalid));
        };

        let result = service.schedule(&request).await;
        Ok(self.finish_submission(result))
    }

    /// Booked date and slot, once on the confirmation step.
    pub fn confirmation(&self) -> Option<Confirmation> {
        if self.step != Step::Confirmation {
            return None;
        }
        let date = self.appointment.date()?;
        Some(Confirmation {
            date: date.format("%d %B %Y").to_string(),
            slot: self.appointment.slot()?.to_string(),
        })
    }

    fn go_to(&mut self, step: Step) {
        tracing::debug!(from = self.step.number(), to = step.number(), "step");
        self.step = step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_zone;
    use chrono::Duration;
    use std::sync::Mutex;

    /// Records requests and answers with a fixed result.
    struct FakeService {
        ok: bool,
        seen: Mutex<Vec<MeetingRequest>>,
    }

    impl FakeService {
        fn new(ok: bool) -> Self {
            FakeService { ok, seen: Mutex::new(Vec::new()) }
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    impl MeetingService for FakeService {
        async fn schedule(&self, request: &MeetingRequest) -> SlotbookResult<()> {
            self.seen.lock().unwrap().push(request.clone());
            if self.ok {
                Ok(())
            } else {
                Err(SlotbookError::UnexpectedStatus(reqwest::StatusCode::BAD_GATEWAY))
            }
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn today() -> NaiveDate {
        now().date_naive()
    }

    fn tomorrow() -> NaiveDate {
        today() + Duration::days(1)
    }

    /// A wizard on the last question with everything filled in.
    fn ready_wizard() -> Wizard {
        let mut w = Wizard::new();
        w.select_date(tomorrow(), today()).unwrap();
        w.select_slot("10:00 AM").unwrap();
        w.select_time_zone(time_zone::find("Asia/Kolkata").unwrap());
        assert!(w.next_from_schedule(now()));

        w.set_contact_field(ContactField::Email, "a@b.com");
        w.set_contact_field(ContactField::Name, "Jane Doe");
        w.set_contact_field(ContactField::Contact, "9876543210");
        w.set_consent(Consent::Yes);
        assert!(w.forward());

        while w.question_next() {}
        assert!(w.questionnaire().is_last());
        w
    }

    #[test]
    fn starts_on_schedule_with_nothing_chosen() {
        let w = Wizard::new();
        assert_eq!(w.step(), Step::Schedule);
        assert!(!w.has_blocking_error());
        assert_eq!(w.time_zone().active(), None);
        assert_eq!(w.consent(), None);
    }

    #[test]
    fn schedule_guard_requires_date() {
        let mut w = Wizard::new();
        w.select_slot("9:00 AM").unwrap();
        assert!(!w.next_from_schedule(now()));
        assert_eq!(w.step(), Step::Schedule);
        assert_eq!(w.errors().date_error, DATE_REQUIRED);
        assert!(w.has_blocking_error());
    }

    #[test]
    fn schedule_guard_requires_slot() {
        let mut w = Wizard::new();
        w.select_date(tomorrow(), today()).unwrap();
        assert!(!w.next_from_schedule(now()));
        assert_eq!(w.errors().slot_error, SLOT_REQUIRED);
        assert!(w.errors().date_error.is_empty());
    }

    #[test]
    fn schedule_guard_rejects_past_start() {
        // 9:00 in Kolkata is 3:30 UTC, well before `now`.
        let mut w = Wizard::new();
        w.select_date(today(), today()).unwrap();
        w.select_slot("9:00 AM").unwrap();
        w.select_time_zone(time_zone::find("Asia/Kolkata").unwrap());
        assert!(!w.next_from_schedule(now()));
        assert_eq!(w.errors().future_date_error, FUTURE_REQUIRED);
        assert_eq!(w.errors().messages(), vec![FUTURE_REQUIRED]);
    }

    #[test]
    fn schedule_guard_uses_chosen_zone() {
        // 11:30 in Los Angeles is 18:30 UTC, still ahead of 12:00 UTC.
        let mut w = Wizard::new();
        w.select_date(today(), today()).unwrap();
        w.select_slot("11:30 AM").unwrap();
        w.select_time_zone(time_zone::find("America/Los_Angeles").unwrap());
        assert!(w.next_from_schedule(now()));
        assert_eq!(w.step(), Step::Details);
    }

    #[test]
    fn schedule_guard_without_zone_uses_local_clock() {
        let slot = TimeSlot::parse("11:00 AM").unwrap();
        let start = Local
            .from_local_datetime(&today().and_time(slot.time()))
            .earliest()
            .unwrap()
            .with_timezone(&Utc);

        let mut w = Wizard::new();
        w.select_date(today(), today()).unwrap();
        w.select_slot("11:00 AM").unwrap();
        assert!(!w.next_from_schedule(start + Duration::minutes(1)));
        assert_eq!(w.errors().future_date_error, FUTURE_REQUIRED);

        let mut w = Wizard::new();
        w.select_date(today(), today()).unwrap();
        w.select_slot("11:00 AM").unwrap();
        assert!(w.next_from_schedule(start - Duration::minutes(1)));
        assert_eq!(w.step(), Step::Details);
    }

    #[test]
    fn passing_guard_clears_every_error() {
        let mut w = Wizard::new();
        assert!(!w.next_from_schedule(now()));
        w.select_date(tomorrow(), today()).unwrap();
        assert!(!w.next_from_schedule(now()));
        assert_eq!(w.errors().messages(), vec![DATE_REQUIRED, SLOT_REQUIRED]);

        w.select_slot("10:30 AM").unwrap();
        assert!(w.next_from_schedule(now()));
        assert!(w.errors().is_empty());
    }

    #[test]
    fn dismissing_warning_resets_everything() {
        let mut w = Wizard::new();
        w.select_slot("9:00 AM").unwrap();
        w.select_time_zone(time_zone::find("Europe/Paris").unwrap());
        assert!(!w.next_from_schedule(now()));

        w.dismiss_error();
        assert_eq!(w.step(), Step::Schedule);
        assert!(w.errors().is_empty());
        assert_eq!(w.appointment().slot(), None);
        assert_eq!(w.time_zone().active(), None);
    }

    #[test]
    fn details_navigation_is_free() {
        let mut w = Wizard::new();
        w.select_date(tomorrow(), today()).unwrap();
        w.select_slot("9:30 AM").unwrap();
        w.next_from_schedule(now());

        assert!(w.forward());
        assert_eq!(w.step(), Step::Questionnaire);
        assert!(w.back());
        assert_eq!(w.step(), Step::Details);
        assert!(w.back());
        assert_eq!(w.step(), Step::Schedule);
        assert!(!w.back());
    }

    #[test]
    fn back_walks_questions_before_leaving() {
        let mut w = ready_wizard();
        let last = w.questionnaire().index();
        assert!(w.back());
        assert_eq!(w.step(), Step::Questionnaire);
        assert_eq!(w.questionnaire().index(), last - 1);

        while w.questionnaire().index() > 0 {
            w.back();
        }
        assert_eq!(w.step(), Step::Questionnaire);
        w.back();
        assert_eq!(w.step(), Step::Details);
    }

    #[test]
    fn forward_ignores_other_steps() {
        let mut w = Wizard::new();
        assert!(!w.forward());
        assert!(!w.question_next());
    }

    #[tokio::test]
    async fn submit_books_and_confirms() {
        let service = FakeService::new(true);
        let mut w = ready_wizard();
        w.toggle_answer(7, "Faster decision-making ");

        let outcome = w.submit(&service).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Booked);
        assert_eq!(w.step(), Step::Confirmation);
        assert!(w.booking().success);
        assert!(!w.booking().loading);

        let seen = service.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let req = &seen[0];
        assert_eq!(req.user_email, "a@b.com");
        assert_eq!(req.duration, "30m");
        assert_eq!(req.time_zone, "Asia/Kolkata");
        assert_eq!(req.date_time, format!("{}T10:00:00.000+05:30", tomorrow()));

        let confirmation = w.confirmation().unwrap();
        assert_eq!(confirmation.date, "20 October 2026");
        assert_eq!(confirmation.slot, "10:00 AM");
    }

    #[tokio::test]
    async fn failed_request_keeps_step() {
        let service = FakeService::new(false);
        let mut w = ready_wizard();

        let outcome = w.submit(&service).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(w.step(), Step::Questionnaire);
        assert!(!w.booking().success);
        assert_eq!(w.booking().error.as_deref(), Some(SUBMIT_FAILED));
        assert!(w.confirmation().is_none());

        // Manual retry sends a fresh request.
        let retry = FakeService::new(true);
        assert_eq!(w.submit(&retry).await.unwrap(), SubmitOutcome::Booked);
        assert_eq!(w.booking().error, None);
        assert_eq!(service.calls() + retry.calls(), 2);
    }

    #[tokio::test]
    async fn invalid_contact_blocks_submit() {
        let service = FakeService::new(true);
        let mut w = ready_wizard();
        w.set_contact_field(ContactField::Contact, "12345");
        w.set_contact_field(ContactField::Email, "nope");

        let outcome = w.submit(&service).await.unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Blocked(vec![ContactField::Email, ContactField::Contact])
        );
        assert_eq!(service.calls(), 0);
        assert!(!w.booking().loading);
        assert_eq!(w.step(), Step::Questionnaire);
    }

    #[tokio::test]
    async fn missing_time_zone_blocks_submit() {
        let service = FakeService::new(true);
        let mut w = Wizard::new();
        w.select_date(tomorrow(), today()).unwrap();
        w.select_slot("10:00 AM").unwrap();
        w.next_from_schedule(now());
        w.set_contact_field(ContactField::Email, "a@b.com");
        w.set_contact_field(ContactField::Name, "Jane Doe");
        w.set_contact_field(ContactField::Contact, "9876543210");
        w.forward();
        while w.question_next() {}

        let outcome = w.submit(&service).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Blocked(vec![]));
        assert_eq!(w.booking().error.as_deref(), Some(TIME_ZONE_REQUIRED));
        assert_eq!(service.calls(), 0);
    }

    #[tokio::test]
    async fn new_attempt_drops_previous_time_zone_error() {
        let service = FakeService::new(true);
        let mut w = ready_wizard();
        w.time_zone = TimeZonePicker::new();

        assert_eq!(w.submit(&service).await.unwrap(), SubmitOutcome::Blocked(vec![]));
        assert_eq!(w.booking().error.as_deref(), Some(TIME_ZONE_REQUIRED));

        w.select_time_zone(time_zone::find("Asia/Kolkata").unwrap());
        w.set_contact_field(ContactField::Contact, "123");
        assert_eq!(
            w.submit(&service).await.unwrap(),
            SubmitOutcome::Blocked(vec![ContactField::Contact])
        );
        assert_eq!(w.booking().error, None);
        assert!(!w.booking().success);
        assert_eq!(service.calls(), 0);
    }

    #[test]
    fn build_request_leaves_nothing_in_flight() {
        let mut w = ready_wizard();
        let request = w.build_request().unwrap().unwrap();
        assert_eq!(request.time_zone, "Asia/Kolkata");
        assert!(!w.booking().loading);

        // A real submission can still follow.
        assert!(w.begin_submission().unwrap().is_some());
        assert!(w.booking().loading);
    }

    #[test]
    fn second_submission_rejected_while_in_flight() {
        let mut w = ready_wizard();
        let first = w.begin_submission().unwrap();
        assert!(first.is_some());
        assert!(w.booking().loading);

        assert!(matches!(w.begin_submission(), Err(SlotbookError::SubmissionInFlight)));

        assert_eq!(w.finish_submission(Ok(())), SubmitOutcome::Booked);
        assert!(!w.booking().loading);
    }

    #[test]
    fn submit_only_from_last_question() {
        let mut w = Wizard::new();
        assert!(matches!(w.begin_submission(), Err(SlotbookError::NotReady(_))));

        let mut w = ready_wizard();
        w.back();
        assert!(matches!(w.begin_submission(), Err(SlotbookError::NotReady(_))));
    }

    #[test]
    fn confirmed_wizard_is_terminal() {
        let mut w = ready_wizard();
        w.begin_submission().unwrap();
        w.finish_submission(Ok(()));
        assert_eq!(w.step(), Step::Confirmation);
        assert!(!w.back());
        assert!(!w.forward());
        assert!(!w.question_next());
        assert!(!w.next_from_schedule(now()));
        assert_eq!(w.step(), Step::Confirmation);
    }

    #[test]
    fn step_display() {
        assert_eq!(Step::Details.to_string(), "2/4 Enter your details");
        assert!(Step::Schedule < Step::Confirmation);
    }
}
