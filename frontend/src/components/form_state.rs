use std::cell::Ref;
use std::rc::Rc;

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use log::debug;

use crate::config::FormConfig;
use crate::forms::controller::{FieldEvent, FormController, SubmissionDriver};
use crate::forms::submission::{GlooClock, SimulatedSubmitter, ThreadRandom};

/// A form controller bound to the component that owns it.
#[derive(Clone)]
pub struct FormHandle {
    driver: SubmissionDriver,
    redraw: Rc<dyn Fn()>,
}

impl FormHandle {
    pub fn controller(&self) -> Ref<'_, FormController> {
        self.driver.controller().borrow()
    }

    pub fn on_field(&self) -> Callback<(&'static str, FieldEvent)> {
        let controller = self.driver.controller().clone();
        let redraw = self.redraw.clone();
        Callback::from(move |(field, event): (&'static str, FieldEvent)| {
            controller.borrow_mut().handle(field, event);
            redraw();
        })
    }

    pub fn on_submit(&self) -> Callback<SubmitEvent> {
        let driver = self.driver.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let driver = driver.clone();
            spawn_local(async move {
                driver.submit().await;
            });
        })
    }
}

#[hook]
pub fn use_form_controller(config: FormConfig) -> FormHandle {
    let update = use_force_update();
    let controller = use_mut_ref(|| FormController::new(config.clone()));

    let redraw: Rc<dyn Fn()> = {
        let controller = controller.clone();
        Rc::new(move || {
            let scroll = controller.borrow_mut().take_scroll_request();
            if scroll {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
            }
            update.force_update();
        })
    };

    let driver = use_state(|| {
        debug!("mounting {} (submit delay {} ms)", config.form_id, config.submit_delay_ms);
        let submitter = SimulatedSubmitter::new(
            GlooClock,
            ThreadRandom,
            config.submit_delay_ms,
            config.success_rate,
        );
        SubmissionDriver::new(
            controller.clone(),
            Rc::new(submitter),
            Rc::new(GlooClock),
            redraw.clone(),
        )
    });

    FormHandle {
        driver: (*driver).clone(),
        redraw,
    }
}
