use shared::{BookingField, BookingForm, FieldErrors, ViewMode};
use web_sys::HtmlInputElement;
use yew::prelude::*;

const ERROR_COLOR: &str = "#dc2626";

#[derive(Properties, PartialEq)]
pub struct BookingFormPanelProps {
    pub mode: ViewMode,
    pub form: BookingForm,
    pub errors: FieldErrors,
    pub can_submit: bool,
    pub submitting: bool,
    pub submit_error: Option<String>,

    pub on_change: Callback<(BookingField, String)>,
    pub on_submit: Callback<()>,
    pub on_back: Callback<()>,
    pub on_delete: Callback<()>,
}

fn field_style(has_error: bool, read_only: bool) -> String {
    format!(
        "border-color: {}; background-color: {};",
        if has_error { ERROR_COLOR } else { "#ccc" },
        if read_only { "#f1f5f9" } else { "white" }
    )
}

/// Add/edit form. Every keystroke is reported through `on_change`.
#[function_component(BookingFormPanel)]
pub fn booking_form_panel(props: &BookingFormPanelProps) -> Html {
    let editing = props.mode == ViewMode::Edit;

    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };
    let on_back = {
        let on_back = props.on_back.clone();
        Callback::from(move |_: MouseEvent| on_back.emit(()))
    };
    let on_delete = {
        let on_delete = props.on_delete.clone();
        Callback::from(move |_: MouseEvent| on_delete.emit(()))
    };

    html! {
        <div class="form-container">
            <h3>{if editing { "Edit Booking" } else { "Add Booking" }}</h3>

            {if let Some(error) = props.submit_error.as_ref() {
                html! { <div class="form-message error">{error}</div> }
            } else { html! {} }}

            <form onsubmit={on_submit}>
                {for BookingField::ALL.iter().map(|&field| {
                    let read_only = field.is_read_only(props.mode);
                    let error = props.errors.get(field);
                    let oninput = {
                        let on_change = props.on_change.clone();
                        Callback::from(move |e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            on_change.emit((field, input.value()));
                        })
                    };

                    html! {
                        <div class="form-group" key={field.name()}>
                            <label for={field.name()}>
                                {field.label()}
                                {if field.is_required() {
                                    html! { <span style={format!("color: {};", ERROR_COLOR)}>{" *"}</span> }
                                } else { html! {} }}
                            </label>
                            <input
                                id={field.name()}
                                type={field.input_type()}
                                name={field.name()}
                                value={props.form.value(field)}
                                oninput={oninput}
                                readonly={read_only}
                                disabled={props.submitting}
                                style={field_style(error.is_some(), read_only)}
                            />
                            {if let Some(message) = error {
                                html! { <small style={format!("color: {};", ERROR_COLOR)}>{message}</small> }
                            } else { html! {} }}
                        </div>
                    }
                })}

                <div class="button-row">
                    <button
                        type="submit"
                        class="primary"
                        disabled={!props.can_submit || props.submitting}
                    >
                        {if editing { "Update" } else { "Submit" }}
                    </button>

                    <button type="button" onclick={on_back}>{"Back"}</button>

                    {if editing {
                        html! {
                            <button type="button" class="danger" onclick={on_delete} disabled={props.submitting}>
                                {"Delete"}
                            </button>
                        }
                    } else { html! {} }}
                </div>
            </form>
        </div>
    }
}
