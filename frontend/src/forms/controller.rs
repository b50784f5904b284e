use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use log::{debug, info, warn};
use thiserror::Error;

use super::feedback::{FieldFeedback, FieldGroupState, FieldView, FormMessage, MessageKind};
use super::rules::FieldInput;
use super::snapshot::FormSnapshot;
use super::strength::PasswordStrength;
use super::submission::{
    Clock, FormSubmissionState, SubmissionError, SubmissionPhase, Submitter,
};
use super::validator::{FieldValidator, FormVerdict};
use crate::config::FormConfig;

const PASSWORD_FIELD: &str = "password";

/// What the submit button shows. Anything but `Ready` is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Ready,
    Loading,
    Succeeded,
}

impl ButtonState {
    pub fn is_disabled(&self) -> bool {
        !matches!(self, ButtonState::Ready)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("a submission is already in progress")]
    InFlight,
    #[error("{failed} field(s) failed validation")]
    Invalid { failed: usize, ticket: u64 },
}

/// A user interaction with one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    Input(String),
    Toggle(bool),
    Focus,
    Blur,
    Hover(bool),
}

pub struct FormController {
    config: FormConfig,
    validator: FieldValidator,
    values: FormSnapshot,
    groups: BTreeMap<&'static str, FieldGroupState>,
    submission: Option<FormSubmissionState>,
    attempts: u64,
    button: ButtonState,
    message: Option<FormMessage>,
    next_ticket: u64,
    strength: PasswordStrength,
    scroll_to_top: bool,
}

impl FormController {
    pub fn new(config: FormConfig) -> Self {
        let validator = FieldValidator::new(config.rules());
        let mut controller = Self {
            config,
            validator,
            values: FormSnapshot::new(),
            groups: BTreeMap::new(),
            submission: None,
            attempts: 0,
            button: ButtonState::Ready,
            message: None,
            next_ticket: 0,
            strength: PasswordStrength::default(),
            scroll_to_top: false,
        };
        controller.clear_fields();
        controller
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    #[cfg(test)]
    pub fn values(&self) -> &FormSnapshot {
        &self.values
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.submission
            .as_ref()
            .map_or(SubmissionPhase::Idle, FormSubmissionState::phase)
    }

    /// The current or most recent submit attempt.
    #[cfg(test)]
    pub fn submission(&self) -> Option<&FormSubmissionState> {
        self.submission.as_ref()
    }

    pub fn button(&self) -> ButtonState {
        self.button
    }

    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    pub fn strength(&self) -> PasswordStrength {
        self.strength
    }

    #[cfg(test)]
    pub fn feedback(&self, field: &str) -> FieldFeedback {
        self.groups
            .get(field)
            .map(|group| group.feedback.clone())
            .unwrap_or_default()
    }

    pub fn field_view(&self, field: &'static str) -> FieldView {
        let group = self.groups.get(field).cloned().unwrap_or_default();
        let slot = self.config.feedback_slot;
        FieldView {
            name: field,
            value: self.values.text(field).to_string(),
            checked: self.values.is_checked(field),
            group_class: group.class(),
            feedback_id: slot.element_id(field),
            feedback_class: group.feedback.class(slot),
            feedback_text: group.feedback.text(),
            feedback_visible: group.feedback.is_visible(),
        }
    }

    /// Applies one field interaction. Value changes and blur revalidate only
    /// that field.
    pub fn handle(&mut self, field: &str, event: FieldEvent) {
        let Some(field) = self.validator.fields().find(|name| *name == field) else {
            debug!("ignoring {:?} on unregistered field {}", event, field);
            return;
        };
        match event {
            FieldEvent::Input(value) => {
                if field == PASSWORD_FIELD && self.config.tracks_password_strength {
                    self.strength = PasswordStrength::evaluate(&value);
                }
                self.values.set_text(field, value);
                self.validate_field(field);
            }
            FieldEvent::Toggle(checked) => {
                self.values.set_checked(field, checked);
                self.validate_field(field);
            }
            FieldEvent::Focus => self.group_mut(field).focused = true,
            FieldEvent::Blur => {
                self.group_mut(field).focused = false;
                self.validate_field(field);
            }
            FieldEvent::Hover(hovered) => self.group_mut(field).hovered = hovered,
        }
    }

    pub fn validate_field(&mut self, field: &'static str) -> bool {
        let result = self.validator.validate(field, &self.values);
        let feedback = FieldFeedback::from_result(&result, self.config.feedback_style);
        self.group_mut(field).feedback = feedback;
        result.is_ok()
    }

    /// Starts a submit attempt. On success the form is `Submitting` and the
    /// returned values are what should be handed to the submitter.
    pub fn begin_submit(&mut self) -> Result<FormSnapshot, SubmitRejected> {
        if matches!(self.phase(), SubmissionPhase::Submitting | SubmissionPhase::Success) {
            debug!("{} submit ignored while {:?}", self.config.form_id, self.phase());
            return Err(SubmitRejected::InFlight);
        }
        self.message = None;
        self.attempts += 1;
        let mut state = FormSubmissionState::new(self.attempts);
        state.enter(SubmissionPhase::Validating);

        let verdict = self.apply_form_verdict();
        if !verdict.is_valid() {
            state.enter(SubmissionPhase::Idle);
            self.submission = Some(state);
            let failed = verdict.failures().count();
            let ticket = self.show_message(self.config.invalid_form_message, MessageKind::Error);
            return Err(SubmitRejected::Invalid { failed, ticket });
        }

        state.enter(SubmissionPhase::Submitting);
        self.submission = Some(state);
        self.button = ButtonState::Loading;
        Ok(self.values.clone())
    }

    /// Records how the submitter answered. Returns the ticket of the message
    /// shown for it.
    pub fn finish_submit(&mut self, outcome: Result<(), SubmissionError>) -> u64 {
        let form_id = self.config.form_id;
        let Some(state) = self.submission.as_mut() else {
            warn!("{} got a submission outcome with no attempt in flight", form_id);
            return self.next_ticket;
        };
        match outcome {
            Ok(()) => {
                info!("{} submission #{} succeeded", form_id, state.attempt());
                state.enter(SubmissionPhase::Success);
                self.button = ButtonState::Succeeded;
                self.scroll_to_top = true;
                self.show_message(self.config.success_message, MessageKind::Success)
            }
            Err(e) => {
                warn!("{} submission #{} failed: {}", form_id, state.attempt(), e);
                state.enter(SubmissionPhase::Failed);
                self.button = ButtonState::Ready;
                self.show_message(self.config.failure_message, MessageKind::Error)
            }
        }
    }

    /// Clears the form after a successful submission. Does nothing in any
    /// other phase.
    pub fn complete_reset(&mut self) -> bool {
        let Some(state) = self.submission.as_mut() else {
            return false;
        };
        if state.phase() != SubmissionPhase::Success {
            return false;
        }
        state.enter(SubmissionPhase::Idle);
        self.clear_fields();
        self.button = ButtonState::Ready;
        self.strength = PasswordStrength::default();
        true
    }

    /// Hides the form message if it is still the one `ticket` was issued for.
    pub fn hide_message(&mut self, ticket: u64) -> bool {
        match self.message.as_mut() {
            Some(message) if message.ticket == ticket && message.visible => {
                message.visible = false;
                true
            }
            _ => false,
        }
    }

    /// Returns whether the page should scroll to the top, once.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_top)
    }

    fn show_message(&mut self, text: &'static str, kind: MessageKind) -> u64 {
        self.next_ticket += 1;
        self.message = Some(FormMessage {
            text,
            kind,
            visible: true,
            ticket: self.next_ticket,
        });
        self.next_ticket
    }

    /// Validates every field, updating each one's feedback.
    fn apply_form_verdict(&mut self) -> FormVerdict {
        let verdict = self.validator.validate_form(&self.values);
        for (field, result) in &verdict.results {
            let feedback = FieldFeedback::from_result(result, self.config.feedback_style);
            self.group_mut(*field).feedback = feedback;
        }
        verdict
    }

    fn clear_fields(&mut self) {
        self.values.clear();
        self.groups.clear();
        let fields: Vec<_> = self.validator.fields().collect();
        for field in fields {
            let input = self.validator.rule(field).map(|rule| rule.input);
            if input == Some(FieldInput::Checkbox) {
                self.values.set_checked(field, false);
            } else {
                self.values.set_text(field, "");
            }
        }
    }

    fn group_mut(&mut self, field: &'static str) -> &mut FieldGroupState {
        self.groups.entry(field).or_default()
    }
}

/// Runs one submit attempt end to end: validation, the submitter call, the
/// message hide timer and the post-success reset. `on_change` fires after
/// every visible transition.
#[derive(Clone)]
pub struct SubmissionDriver {
    controller: Rc<RefCell<FormController>>,
    submitter: Rc<dyn Submitter>,
    clock: Rc<dyn Clock>,
    on_change: Rc<dyn Fn()>,
}

impl SubmissionDriver {
    pub fn new(
        controller: Rc<RefCell<FormController>>,
        submitter: Rc<dyn Submitter>,
        clock: Rc<dyn Clock>,
        on_change: Rc<dyn Fn()>,
    ) -> Self {
        Self {
            controller,
            submitter,
            clock,
            on_change,
        }
    }

    pub fn controller(&self) -> &Rc<RefCell<FormController>> {
        &self.controller
    }

    pub async fn submit(&self) {
        let begun = self.controller.borrow_mut().begin_submit();
        let payload = match begun {
            Ok(payload) => payload,
            Err(SubmitRejected::InFlight) => return,
            Err(SubmitRejected::Invalid { failed, ticket }) => {
                debug!("submit blocked by {} invalid field(s)", failed);
                (self.on_change)();
                self.hide_message_later(ticket).await;
                return;
            }
        };
        (self.on_change)();

        let outcome = self.submitter.submit_form(payload).await;
        let succeeded = outcome.is_ok();
        let ticket = self.controller.borrow_mut().finish_submit(outcome);
        (self.on_change)();

        if succeeded {
            futures::join!(self.hide_message_later(ticket), self.reset_later());
        } else {
            self.hide_message_later(ticket).await;
        }
    }

    async fn hide_message_later(&self, ticket: u64) {
        let delay = self.controller.borrow().config().message_hide_ms;
        self.clock.sleep(delay).await;
        let hidden = self.controller.borrow_mut().hide_message(ticket);
        if hidden {
            (self.on_change)();
        }
    }

    async fn reset_later(&self) {
        let delay = self.controller.borrow().config().reset_delay_ms;
        self.clock.sleep(delay).await;
        let reset = self.controller.borrow_mut().complete_reset();
        if reset {
            (self.on_change)();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::channel::oneshot;
    use futures::executor::{block_on, LocalPool};
    use futures::future::LocalBoxFuture;
    use futures::task::LocalSpawnExt;
    use futures::FutureExt;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::forms::feedback::CHECKMARK;
    use crate::forms::rules;
    use crate::forms::submission::testing::{FixedRandom, ManualClock};
    use crate::forms::submission::SimulatedSubmitter;

    const SIGNUP_VALUES: [(&str, &str); 7] = [
        ("fullName", "مریم احمدی"),
        ("username", "maryam_a"),
        ("phoneNumber", "+989121234567"),
        ("email", "maryam@example.ir"),
        ("password", "Abcdef1!"),
        ("confirmPassword", "Abcdef1!"),
        ("country", "iran"),
    ];

    fn filled_signup() -> FormController {
        let mut controller = FormController::new(FormConfig::signup());
        for (field, value) in SIGNUP_VALUES {
            controller.handle(field, FieldEvent::Input(value.to_string()));
        }
        controller.handle("termsAccepted", FieldEvent::Toggle(true));
        controller
    }

    fn filled_contact() -> FormController {
        let mut controller = FormController::new(FormConfig::contact());
        controller.handle("fullName", FieldEvent::Input("Sara".into()));
        controller.handle("email", FieldEvent::Input("sara@example.com".into()));
        controller.handle("subject", FieldEvent::Input("support".into()));
        controller.handle("message", FieldEvent::Input("this is long enough".into()));
        controller
    }

    struct Harness {
        driver: SubmissionDriver,
        clock: ManualClock,
        random: FixedRandom,
        seen: Rc<RefCell<Vec<SubmissionPhase>>>,
    }

    fn harness(controller: FormController, draw: f64) -> Harness {
        let clock = ManualClock::default();
        let random = FixedRandom::new(draw);
        let config = controller.config().clone();
        let submitter = SimulatedSubmitter::new(
            clock.clone(),
            random.clone(),
            config.submit_delay_ms,
            config.success_rate,
        );
        let controller = Rc::new(RefCell::new(controller));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let on_change = {
            let controller = controller.clone();
            let seen = seen.clone();
            Rc::new(move || seen.borrow_mut().push(controller.borrow().phase()))
        };
        Harness {
            driver: SubmissionDriver::new(controller, Rc::new(submitter), Rc::new(clock.clone()), on_change),
            clock,
            random,
            seen,
        }
    }

    #[test]
    fn successful_signup_runs_full_lifecycle_and_resets() {
        let h = harness(filled_signup(), 0.5);
        block_on(h.driver.submit());

        let controller = h.driver.controller().borrow();
        assert_eq!(
            controller.submission().unwrap().history(),
            [
                SubmissionPhase::Idle,
                SubmissionPhase::Validating,
                SubmissionPhase::Submitting,
                SubmissionPhase::Success,
                SubmissionPhase::Idle,
            ]
        );
        assert_eq!(
            *h.seen.borrow(),
            vec![
                SubmissionPhase::Submitting,
                SubmissionPhase::Success,
                SubmissionPhase::Success,
                SubmissionPhase::Idle,
            ]
        );
        // Submit delay, then message hide and reset timers started together.
        assert_eq!(h.clock.sleeps(), vec![2_500, 6_000, 3_000]);

        assert_eq!(controller.phase(), SubmissionPhase::Idle);
        assert_eq!(controller.button(), ButtonState::Ready);
        assert_eq!(controller.values().text("email"), "");
        assert!(!controller.values().is_checked("termsAccepted"));
        assert_eq!(controller.feedback("email"), FieldFeedback::Neutral);
        assert_eq!(controller.strength().score(), 0);
        let message = controller.message().unwrap();
        assert_eq!(message.text, controller.config().success_message);
        assert!(!message.visible);
    }

    #[test]
    fn success_is_visible_before_the_reset_timer_fires() {
        let mut controller = filled_signup();
        let payload = controller.begin_submit().unwrap();
        assert_eq!(payload.text("username"), "maryam_a");
        assert_eq!(controller.phase(), SubmissionPhase::Submitting);
        assert!(controller.button().is_disabled());

        controller.finish_submit(Ok(()));
        assert_eq!(controller.phase(), SubmissionPhase::Success);
        assert_eq!(controller.button(), ButtonState::Succeeded);
        assert_eq!(controller.message().unwrap().class(), "form-message success");
        assert!(controller.take_scroll_request());
        assert!(!controller.take_scroll_request());
        // Values stay until the reset.
        assert_eq!(controller.values().text("username"), "maryam_a");

        assert!(controller.complete_reset());
        assert_eq!(controller.values().text("username"), "");
        assert!(!controller.complete_reset());
    }

    #[test]
    fn input_during_reset_window_does_not_cancel_the_reset() {
        let mut controller = filled_signup();
        controller.begin_submit().unwrap();
        controller.finish_submit(Ok(()));

        controller.handle("username", FieldEvent::Input("changed_name".into()));
        assert_eq!(controller.values().text("username"), "changed_name");
        assert_eq!(controller.phase(), SubmissionPhase::Success);
        assert_eq!(controller.begin_submit(), Err(SubmitRejected::InFlight));

        assert!(controller.complete_reset());
        assert_eq!(controller.phase(), SubmissionPhase::Idle);
        assert_eq!(controller.values().text("username"), "");
        assert_eq!(controller.feedback("username"), FieldFeedback::Neutral);
        assert_eq!(controller.button(), ButtonState::Ready);
    }

    #[test]
    fn failed_submission_keeps_values_and_reenables_button() {
        let h = harness(filled_contact(), 0.95);
        block_on(h.driver.submit());

        let controller = h.driver.controller().borrow();
        assert_eq!(controller.phase(), SubmissionPhase::Failed);
        assert_eq!(controller.button(), ButtonState::Ready);
        assert_eq!(controller.values().text("message"), "this is long enough");
        assert_eq!(controller.message().unwrap().text, controller.config().failure_message);
        assert_eq!(h.clock.sleeps(), vec![2_000, 5_000]);
    }

    #[test]
    fn resubmitting_after_failure_starts_a_fresh_attempt() {
        let h = harness(filled_contact(), 0.95);
        block_on(h.driver.submit());
        assert_eq!(h.driver.controller().borrow().phase(), SubmissionPhase::Failed);

        h.random.set(0.1);
        block_on(h.driver.submit());
        let controller = h.driver.controller().borrow();
        let attempt = controller.submission().unwrap();
        assert_eq!(attempt.attempt(), 2);
        assert_eq!(&attempt.history()[..4], [
            SubmissionPhase::Idle,
            SubmissionPhase::Validating,
            SubmissionPhase::Submitting,
            SubmissionPhase::Success,
        ]);
        assert_eq!(controller.phase(), SubmissionPhase::Idle);
    }

    #[test]
    fn unaccepted_terms_block_submission() {
        let mut controller = filled_signup();
        controller.handle("termsAccepted", FieldEvent::Toggle(false));

        let rejected = controller.begin_submit().unwrap_err();
        assert_eq!(rejected, SubmitRejected::Invalid { failed: 1, ticket: 1 });
        assert_eq!(controller.phase(), SubmissionPhase::Idle);
        assert_eq!(controller.button(), ButtonState::Ready);
        assert_eq!(
            controller.feedback("termsAccepted"),
            FieldFeedback::Error(rules::TERMS_MESSAGE)
        );
        assert_eq!(controller.feedback("email"), FieldFeedback::Success);
        let message = controller.message().unwrap();
        assert_eq!(message.text, controller.config().invalid_form_message);
        assert_eq!(message.kind, MessageKind::Error);
    }

    #[test]
    fn invalid_form_never_reaches_the_submitter() {
        let h = harness(FormController::new(FormConfig::contact()), 0.0);
        block_on(h.driver.submit());

        let controller = h.driver.controller().borrow();
        assert_eq!(
            controller.submission().unwrap().history(),
            [SubmissionPhase::Idle, SubmissionPhase::Validating, SubmissionPhase::Idle]
        );
        // Only the message hide timer ran.
        assert_eq!(h.clock.sleeps(), vec![5_000]);
        assert!(!controller.message().unwrap().visible);
    }

    #[test]
    fn stale_hide_ticket_leaves_newer_message_visible() {
        let mut controller = FormController::new(FormConfig::contact());
        let Err(SubmitRejected::Invalid { ticket: first, .. }) = controller.begin_submit() else {
            panic!("empty form should be rejected");
        };
        let Err(SubmitRejected::Invalid { ticket: second, .. }) = controller.begin_submit() else {
            panic!("empty form should be rejected");
        };
        assert!(!controller.hide_message(first));
        assert!(controller.message().unwrap().visible);
        assert!(controller.hide_message(second));
    }

    struct GatedSubmitter {
        gates: Rc<RefCell<Vec<oneshot::Sender<Result<(), SubmissionError>>>>>,
    }

    impl Submitter for GatedSubmitter {
        fn submit_form(&self, _payload: FormSnapshot) -> LocalBoxFuture<'static, Result<(), SubmissionError>> {
            let (tx, rx) = oneshot::channel();
            self.gates.borrow_mut().push(tx);
            rx.map(|outcome| outcome.unwrap_or(Err(SubmissionError))).boxed_local()
        }
    }

    #[test]
    fn second_submit_while_in_flight_is_rejected() {
        let gates = Rc::new(RefCell::new(Vec::new()));
        let clock = ManualClock::default();
        let controller = Rc::new(RefCell::new(filled_signup()));
        let driver = SubmissionDriver::new(
            controller.clone(),
            Rc::new(GatedSubmitter { gates: gates.clone() }),
            Rc::new(clock.clone()),
            Rc::new(|| {}),
        );

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        for _ in 0..2 {
            let driver = driver.clone();
            spawner.spawn_local(async move { driver.submit().await }).unwrap();
        }
        pool.run_until_stalled();

        assert_eq!(gates.borrow().len(), 1);
        assert_eq!(controller.borrow().phase(), SubmissionPhase::Submitting);
        assert_eq!(controller.borrow_mut().begin_submit(), Err(SubmitRejected::InFlight));

        let gate = gates.borrow_mut().pop().unwrap();
        gate.send(Ok(())).unwrap();
        pool.run_until_stalled();
        assert_eq!(controller.borrow().phase(), SubmissionPhase::Idle);
        assert_eq!(controller.borrow().submission().unwrap().attempt(), 1);
    }

    #[test]
    fn signup_shows_checkmark_but_contact_only_clears() {
        let signup = filled_signup();
        let view = signup.field_view("email");
        assert_eq!(view.feedback_text, CHECKMARK);
        assert_eq!(view.feedback_id, "emailFeedback");
        assert_eq!(view.group_class, "form-group success");

        let contact = filled_contact();
        let view = contact.field_view("email");
        assert_eq!(view.feedback_text, "");
        assert!(!view.feedback_visible);
        assert_eq!(view.feedback_id, "emailError");
        assert_eq!(view.group_class, "form-group");
    }

    #[test]
    fn live_feedback_updates_only_the_edited_field() {
        let mut controller = FormController::new(FormConfig::contact());
        controller.handle("message", FieldEvent::Input("short".into()));
        assert_eq!(
            controller.feedback("message"),
            FieldFeedback::Error(rules::CONTACT_MESSAGE_MESSAGE)
        );
        assert_eq!(controller.feedback("email"), FieldFeedback::Neutral);

        let before = controller.field_view("message");
        controller.handle("message", FieldEvent::Blur);
        controller.handle("message", FieldEvent::Blur);
        assert_eq!(controller.field_view("message"), before);

        controller.handle("message", FieldEvent::Input("this is long enough".into()));
        assert_eq!(controller.feedback("message"), FieldFeedback::Neutral);
    }

    #[test]
    fn focus_and_hover_toggle_group_classes() {
        let mut controller = FormController::new(FormConfig::signup());
        controller.handle("username", FieldEvent::Focus);
        controller.handle("username", FieldEvent::Hover(true));
        assert_eq!(controller.field_view("username").group_class, "form-group focused hovered");

        controller.handle("username", FieldEvent::Hover(false));
        controller.handle("username", FieldEvent::Blur);
        assert_eq!(controller.field_view("username").group_class, "form-group error");
    }

    #[test]
    fn password_edits_drive_the_strength_meter() {
        let mut controller = FormController::new(FormConfig::signup());
        controller.handle("password", FieldEvent::Input("Abcdef1!".into()));
        let strength = controller.strength();
        assert_eq!((strength.score(), strength.percent(), strength.label()), (5, 100, "very strong"));

        controller.handle("password", FieldEvent::Input(String::new()));
        assert_eq!(controller.strength().label(), "");
    }

    #[test]
    fn changing_password_does_not_touch_confirmation_feedback() {
        let mut controller = filled_signup();
        controller.handle("password", FieldEvent::Input("Changed99!".into()));
        assert_eq!(controller.feedback("confirmPassword"), FieldFeedback::Success);

        controller.handle("confirmPassword", FieldEvent::Blur);
        assert_eq!(
            controller.feedback("confirmPassword"),
            FieldFeedback::Error(rules::CONFIRM_PASSWORD_MESSAGE)
        );
    }

    #[test]
    fn events_for_unknown_fields_are_ignored() {
        let mut controller = FormController::new(FormConfig::contact());
        controller.handle("nickname", FieldEvent::Input("x".into()));
        assert_eq!(controller.values().get("nickname"), None);
    }
}
