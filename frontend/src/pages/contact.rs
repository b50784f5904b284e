use yew::prelude::*;

use crate::components::form_field::{form_messages, submit_button, FieldKind, FormField, FORM_STYLES};
use crate::components::form_state::use_form_controller;
use crate::config::FormConfig;

const SUBJECTS: &[(&str, &str)] = &[
    ("", "انتخاب موضوع / Select a subject"),
    ("general", "سوال عمومی / General question"),
    ("trading", "آموزش معامله‌گری / Trading education"),
    ("support", "پشتیبانی فنی / Technical support"),
    ("partnership", "همکاری / Partnership"),
];

#[function_component]
pub fn Contact() -> Html {
    let form = use_form_controller(FormConfig::contact());
    let on_field = form.on_field();
    let onsubmit = form.on_submit();
    let controller = form.controller();

    html! {
        <div class="contact-page" dir="rtl" style="min-height: 100vh; display: flex; align-items: center; justify-content: center; padding: 2rem;">
            <style>{FORM_STYLES}</style>
            <div class="form-card contact-form-card">
                <h1>{"تماس با ما / Contact us"}</h1>
                { form_messages(controller.message()) }
                <form id={controller.config().form_id} {onsubmit} novalidate=true>
                    <FormField
                        view={controller.field_view("fullName")}
                        label="نام کامل / Full name"
                        kind={FieldKind::Input("text")}
                        on_event={on_field.clone()}
                    />
                    <FormField
                        view={controller.field_view("email")}
                        label="ایمیل / Email"
                        kind={FieldKind::Input("email")}
                        placeholder="you@example.com"
                        on_event={on_field.clone()}
                    />
                    <FormField
                        view={controller.field_view("subject")}
                        label="موضوع / Subject"
                        kind={FieldKind::Select(SUBJECTS)}
                        on_event={on_field.clone()}
                    />
                    <FormField
                        view={controller.field_view("message")}
                        label="پیام / Message"
                        kind={FieldKind::TextArea}
                        on_event={on_field}
                    />
                    { submit_button(controller.button(), "ارسال پیام / Send message", " در حال ارسال... / Sending...", "ارسال شد / Sent") }
                </form>
            </div>
        </div>
    }
}
