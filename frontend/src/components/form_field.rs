use yew::prelude::*;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::forms::controller::{ButtonState, FieldEvent};
use crate::forms::feedback::{FieldView, FormMessage};

pub const FORM_STYLES: &str = r#"
.form-card {
    background: rgba(30, 30, 30, 0.7);
    border: 1px solid rgba(0, 200, 120, 0.15);
    border-radius: 16px;
    padding: 2.5rem;
    width: 100%;
    max-width: 560px;
    backdrop-filter: blur(10px);
    box-shadow: 0 8px 32px rgba(0, 0, 0, 0.3);
}
.form-group {
    display: flex;
    flex-direction: column;
    gap: 0.4rem;
    margin-bottom: 1.2rem;
    transition: transform 0.2s ease;
}
.form-group.hovered { transform: translateY(-1px); }
.form-group label { color: rgba(255, 255, 255, 0.85); font-size: 0.95rem; }
.form-input {
    padding: 0.75rem 1rem;
    border-radius: 8px;
    border: 1px solid rgba(255, 255, 255, 0.2);
    background: rgba(0, 0, 0, 0.3);
    color: #fff;
    font-size: 1rem;
}
.form-group.focused .form-input { border-color: #00c878; }
.form-group.error .form-input { border-color: #ff6b6b; }
.form-group.success .form-input { border-color: #32cd32; }
.form-feedback, .form-error { font-size: 0.85rem; }
.form-feedback.error, .form-error.error { color: #ff6b6b; }
.form-feedback.success { color: #32cd32; }
.checkbox-group { flex-direction: row; align-items: center; gap: 0.75rem; }
.password-wrapper { position: relative; display: flex; }
.password-wrapper .form-input { flex: 1; }
.password-toggle {
    position: absolute;
    left: 0.75rem;
    top: 50%;
    transform: translateY(-50%);
    background: none;
    border: none;
    color: rgba(255, 255, 255, 0.6);
    cursor: pointer;
}
.password-strength { display: flex; align-items: center; gap: 0.75rem; }
.strength-meter {
    flex: 1;
    height: 6px;
    border-radius: 3px;
    background: rgba(255, 255, 255, 0.2);
    overflow: hidden;
}
.strength-fill { height: 100%; transition: width 0.3s ease, background-color 0.3s ease; }
.strength-text { font-size: 0.8rem; min-width: 5rem; }
.form-messages { display: none; }
.form-message { padding: 0.9rem 1rem; border-radius: 8px; margin-bottom: 1rem; }
.form-message.success { background: rgba(50, 205, 50, 0.15); color: #32cd32; }
.form-message.error { background: rgba(255, 107, 107, 0.15); color: #ff6b6b; }
.submit-btn {
    width: 100%;
    padding: 0.9rem;
    border: none;
    border-radius: 8px;
    background: linear-gradient(45deg, #00563b, #00c878);
    color: #fff;
    font-size: 1rem;
    cursor: pointer;
}
.submit-btn:disabled { opacity: 0.7; cursor: not-allowed; }
.btn-loading, .btn-success { display: flex; align-items: center; justify-content: center; gap: 0.5rem; }
.loading-spinner {
    display: inline-block;
    width: 18px;
    height: 18px;
    border: 3px solid rgba(255,255,255,.3);
    border-radius: 50%;
    border-top-color: #fff;
    animation: spin 1s ease-in-out infinite;
}
@keyframes spin { to { transform: rotate(360deg); } }
@media (max-width: 768px) {
    .form-card { padding: 1.5rem; margin: 1rem; }
}
"#;

#[derive(Clone, PartialEq)]
pub enum FieldKind {
    Input(&'static str),
    TextArea,
    Select(&'static [(&'static str, &'static str)]),
    Checkbox,
}

#[derive(Properties, PartialEq)]
pub struct FormFieldProps {
    pub view: FieldView,
    pub label: AttrValue,
    pub kind: FieldKind,
    #[prop_or_default]
    pub placeholder: AttrValue,
    pub on_event: Callback<(&'static str, FieldEvent)>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component]
pub fn FormField(props: &FormFieldProps) -> Html {
    let view = &props.view;
    let name = view.name;
    let emit = {
        let on_event = props.on_event.clone();
        move |event: FieldEvent| on_event.emit((name, event))
    };

    let onfocus = {
        let emit = emit.clone();
        Callback::from(move |_: FocusEvent| emit(FieldEvent::Focus))
    };
    let onblur = {
        let emit = emit.clone();
        Callback::from(move |_: FocusEvent| emit(FieldEvent::Blur))
    };
    let onmouseenter = {
        let emit = emit.clone();
        Callback::from(move |_: MouseEvent| emit(FieldEvent::Hover(true)))
    };
    let onmouseleave = {
        let emit = emit.clone();
        Callback::from(move |_: MouseEvent| emit(FieldEvent::Hover(false)))
    };

    let control = match &props.kind {
        FieldKind::Input(input_type) => {
            let oninput = {
                let emit = emit.clone();
                Callback::from(move |e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    emit(FieldEvent::Input(input.value()));
                })
            };
            html! {
                <input
                    class="form-input"
                    type={*input_type}
                    id={name}
                    name={name}
                    placeholder={props.placeholder.clone()}
                    value={view.value.clone()}
                    {oninput} {onfocus} {onblur} {onmouseenter} {onmouseleave}
                />
            }
        }
        FieldKind::TextArea => {
            let oninput = {
                let emit = emit.clone();
                Callback::from(move |e: InputEvent| {
                    let area: HtmlTextAreaElement = e.target_unchecked_into();
                    emit(FieldEvent::Input(area.value()));
                })
            };
            html! {
                <textarea
                    class="form-input"
                    id={name}
                    name={name}
                    rows="5"
                    placeholder={props.placeholder.clone()}
                    value={view.value.clone()}
                    {oninput} {onfocus} {onblur} {onmouseenter} {onmouseleave}
                />
            }
        }
        FieldKind::Select(options) => {
            let onchange = {
                let emit = emit.clone();
                Callback::from(move |e: Event| {
                    let select: HtmlSelectElement = e.target_unchecked_into();
                    emit(FieldEvent::Input(select.value()));
                })
            };
            html! {
                <select
                    class="form-input"
                    id={name}
                    name={name}
                    {onchange} {onfocus} {onblur} {onmouseenter} {onmouseleave}
                >
                    { for options.iter().map(|(value, label)| html! {
                        <option value={*value} selected={view.value == *value}>{*label}</option>
                    }) }
                </select>
            }
        }
        FieldKind::Checkbox => {
            let onchange = {
                let emit = emit.clone();
                Callback::from(move |e: Event| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    emit(FieldEvent::Toggle(input.checked()));
                })
            };
            html! {
                <input
                    type="checkbox"
                    id={name}
                    name={name}
                    checked={view.checked}
                    {onchange}
                />
            }
        }
    };

    let group_class = if props.kind == FieldKind::Checkbox {
        format!("{} checkbox-group", view.group_class)
    } else {
        view.group_class.clone()
    };
    let feedback_style = if view.feedback_visible { "display: block;" } else { "display: none;" };

    html! {
        <div class={group_class}>
            <label for={name}>{props.label.clone()}</label>
            { control }
            { for props.children.iter() }
            <div id={view.feedback_id.clone()} class={view.feedback_class.clone()} style={feedback_style}>
                { view.feedback_text }
            </div>
        </div>
    }
}

pub fn form_messages(message: Option<&FormMessage>) -> Html {
    match message {
        Some(message) => html! {
            <div
                id="formMessages"
                class={message.class()}
                style={if message.visible { "display: block;" } else { "display: none;" }}
            >
                { message.text }
            </div>
        },
        None => html! { <div id="formMessages" class="form-messages"></div> },
    }
}

pub fn submit_button(state: ButtonState, idle: &'static str, loading: &'static str, done: &'static str) -> Html {
    html! {
        <button type="submit" id="submitBtn" class="submit-btn" disabled={state.is_disabled()}>
            {
                match state {
                    ButtonState::Ready => html! { <span class="btn-text">{idle}</span> },
                    ButtonState::Loading => html! {
                        <span id="btnLoading" class="btn-loading">
                            <span class="loading-spinner"></span>{loading}
                        </span>
                    },
                    ButtonState::Succeeded => html! {
                        <span id="btnSuccess" class="btn-success">{"✓ "}{done}</span>
                    },
                }
            }
        </button>
    }
}
