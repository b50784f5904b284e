use yew::prelude::*;

use crate::components::form_field::{form_messages, submit_button, FieldKind, FormField, FORM_STYLES};
use crate::components::form_state::use_form_controller;
use crate::config::FormConfig;
use crate::forms::strength::PasswordStrength;

const COUNTRIES: &[(&str, &str)] = &[
    ("", "انتخاب کشور / Select a country"),
    ("iran", "ایران / Iran"),
    ("afghanistan", "افغانستان / Afghanistan"),
    ("tajikistan", "تاجیکستان / Tajikistan"),
    ("turkey", "ترکیه / Turkey"),
    ("uae", "امارات / UAE"),
    ("other", "سایر / Other"),
];

#[derive(Properties, PartialEq)]
struct StrengthMeterProps {
    strength: PasswordStrength,
}

#[function_component]
fn StrengthMeter(props: &StrengthMeterProps) -> Html {
    let strength = props.strength;
    html! {
        <div class="password-strength">
            <div class="strength-meter">
                <div
                    id="strengthFill"
                    class="strength-fill"
                    style={format!("width: {}%; background-color: {};", strength.percent(), strength.color())}
                ></div>
            </div>
            <span id="strengthText" class="strength-text" style={format!("color: {};", strength.color())}>
                { strength.label() }
            </span>
        </div>
    }
}

#[function_component]
pub fn Signup() -> Html {
    let form = use_form_controller(FormConfig::signup());
    let password_visible = use_state(|| false);
    let on_field = form.on_field();
    let onsubmit = form.on_submit();
    let controller = form.controller();

    let toggle_password = {
        let password_visible = password_visible.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            password_visible.set(!*password_visible);
        })
    };
    let password_type = if *password_visible { "text" } else { "password" };

    html! {
        <div class="signup-page" dir="rtl" style="min-height: 100vh; display: flex; align-items: center; justify-content: center; padding: 2rem;">
            <style>{FORM_STYLES}</style>
            <div class="form-card signup-form-card">
                <h1>{"ثبت‌نام / Sign up"}</h1>
                { form_messages(controller.message()) }
                <form id={controller.config().form_id} {onsubmit} novalidate=true>
                    <FormField
                        view={controller.field_view("fullName")}
                        label="نام کامل / Full name"
                        kind={FieldKind::Input("text")}
                        on_event={on_field.clone()}
                    />
                    <FormField
                        view={controller.field_view("username")}
                        label="نام کاربری / Username"
                        kind={FieldKind::Input("text")}
                        on_event={on_field.clone()}
                    />
                    <FormField
                        view={controller.field_view("phoneNumber")}
                        label="شماره تماس / Phone number"
                        kind={FieldKind::Input("tel")}
                        placeholder="09123456789"
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
                        view={controller.field_view("password")}
                        label="رمز عبور / Password"
                        kind={FieldKind::Input(password_type)}
                        on_event={on_field.clone()}
                    >
                        <button
                            type="button"
                            id="passwordToggle"
                            class="password-toggle"
                            onclick={toggle_password}
                        >
                            { if *password_visible { "🙈" } else { "👁" } }
                        </button>
                        <StrengthMeter strength={controller.strength()} />
                    </FormField>
                    <FormField
                        view={controller.field_view("confirmPassword")}
                        label="تأیید رمز عبور / Confirm password"
                        kind={FieldKind::Input("password")}
                        on_event={on_field.clone()}
                    />
                    <FormField
                        view={controller.field_view("country")}
                        label="کشور / Country"
                        kind={FieldKind::Select(COUNTRIES)}
                        on_event={on_field.clone()}
                    />
                    <FormField
                        view={controller.field_view("termsAccepted")}
                        label="شرایط و قوانین را می‌پذیرم / I accept the terms and conditions"
                        kind={FieldKind::Checkbox}
                        on_event={on_field}
                    />
                    { submit_button(controller.button(), "ثبت‌نام / Create account", " در حال ثبت‌نام... / Signing up...", "ثبت‌نام انجام شد / Registered") }
                </form>
            </div>
        </div>
    }
}
