use chrono::NaiveDate;
use shared::{Booking, BookingEditor, BookingField, SubmitAction, ViewMode};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::{BookingFormPanel, BookingTable};
use hooks::use_bookings::{use_bookings, UseBookingsResult};
use services::api::ApiClient;

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[function_component(App)]
fn app() -> Html {
    let api_client = use_memo((), |_| ApiClient::new());
    let UseBookingsResult { state, refresh } = use_bookings(&api_client);

    let editor = use_state(BookingEditor::default);
    let submitting = use_state(|| false);
    let submit_error = use_state(|| None::<String>);

    let on_add = {
        let editor = editor.clone();
        let submit_error = submit_error.clone();
        Callback::from(move |_| {
            let mut next = (*editor).clone();
            next.start_add();
            editor.set(next);
            submit_error.set(None);
        })
    };

    let on_edit = {
        let editor = editor.clone();
        let submit_error = submit_error.clone();
        Callback::from(move |booking: Booking| {
            let mut next = (*editor).clone();
            next.start_edit(&booking);
            editor.set(next);
            submit_error.set(None);
        })
    };

    let on_back = {
        let editor = editor.clone();
        let submit_error = submit_error.clone();
        Callback::from(move |_| {
            editor.set(BookingEditor::default());
            submit_error.set(None);
        })
    };

    let on_change = {
        let editor = editor.clone();
        Callback::from(move |(field, value): (BookingField, String)| {
            let mut next = (*editor).clone();
            next.change(field, value, today());
            editor.set(next);
        })
    };

    // Create or update, then return to the list and reload it
    let on_submit = {
        let api_client = api_client.clone();
        let editor = editor.clone();
        let submitting = submitting.clone();
        let submit_error = submit_error.clone();
        let refresh = refresh.clone();

        Callback::from(move |_| {
            let mut next = (*editor).clone();
            let action = next.submit(today());
            editor.set(next);

            let Some(action) = action else {
                return;
            };

            let api_client = api_client.clone();
            let editor = editor.clone();
            let submitting = submitting.clone();
            let submit_error = submit_error.clone();
            let refresh = refresh.clone();

            spawn_local(async move {
                submitting.set(true);
                submit_error.set(None);

                let result = match action {
                    SubmitAction::Create(payload) => api_client.create_booking(&payload).await.map(|_| ()),
                    SubmitAction::Update(id, payload) => api_client.update_booking(id, &payload).await.map(|_| ()),
                };

                match result {
                    Ok(()) => {
                        editor.set(BookingEditor::default());
                        refresh.emit(());
                    }
                    Err(e) => {
                        gloo::console::error!("Failed to save booking:", e.clone());
                        submit_error.set(Some(e));
                    }
                }

                submitting.set(false);
            });
        })
    };

    let on_delete = {
        let api_client = api_client.clone();
        let editor = editor.clone();
        let submitting = submitting.clone();
        let submit_error = submit_error.clone();
        let refresh = refresh.clone();

        Callback::from(move |_| {
            let Some(id) = editor.delete_target() else {
                return;
            };

            let api_client = api_client.clone();
            let editor = editor.clone();
            let submitting = submitting.clone();
            let submit_error = submit_error.clone();
            let refresh = refresh.clone();

            spawn_local(async move {
                submitting.set(true);
                submit_error.set(None);

                match api_client.delete_booking(id).await {
                    Ok(_) => {
                        editor.set(BookingEditor::default());
                        refresh.emit(());
                    }
                    Err(e) => {
                        gloo::console::error!("Failed to delete booking:", e.clone());
                        submit_error.set(Some(e));
                    }
                }

                submitting.set(false);
            });
        })
    };

    if state.loading {
        return html! {
            <div class="app-container">
                <h2>{"Loading bookings…"}</h2>
            </div>
        };
    }

    if let Some(error) = state.load_error.as_ref() {
        return html! {
            <div class="app-container">
                <h2 class="page-error">{error}</h2>
            </div>
        };
    }

    html! {
        <div class="app-container">
            <h2>{"Hall Booking System"}</h2>

            {match editor.mode() {
                ViewMode::List => html! {
                    <BookingTable bookings={state.bookings.clone()} on_add={on_add} on_edit={on_edit} />
                },
                mode => html! {
                    <BookingFormPanel
                        mode={mode}
                        form={editor.form().clone()}
                        errors={editor.errors().clone()}
                        can_submit={editor.can_submit()}
                        submitting={*submitting}
                        submit_error={(*submit_error).clone()}
                        on_change={on_change}
                        on_submit={on_submit}
                        on_back={on_back}
                        on_delete={on_delete}
                    />
                },
            }}
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
