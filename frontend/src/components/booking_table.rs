use shared::Booking;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BookingTableProps {
    pub bookings: Vec<Booking>,
    pub on_add: Callback<()>,
    pub on_edit: Callback<Booking>,
}

fn optional_amount(amount: Option<f64>) -> String {
    amount.map(|value| value.to_string()).unwrap_or_default()
}

#[function_component(BookingTable)]
pub fn booking_table(props: &BookingTableProps) -> Html {
    let on_add = {
        let on_add = props.on_add.clone();
        Callback::from(move |_: MouseEvent| on_add.emit(()))
    };

    html! {
        <>
            <div class="add-button">
                <button class="primary" onclick={on_add}>{"Add New Booking"}</button>
            </div>

            <table>
                <thead>
                    <tr>
                        <th>{"Receipt"}</th>
                        <th>{"Applicant"}</th>
                        <th>{"Mobile"}</th>
                        <th>{"Email"}</th>
                        <th>{"Hall"}</th>
                        <th>{"Purpose"}</th>
                        <th>{"Rent"}</th>
                        <th>{"Charges"}</th>
                        <th>{"Total"}</th>
                        <th>{"Remark"}</th>
                        <th>{"Date"}</th>
                        <th>{"Edit"}</th>
                    </tr>
                </thead>
                <tbody>
                    {for props.bookings.iter().map(|booking| {
                        let on_edit = {
                            let on_edit = props.on_edit.clone();
                            let booking = booking.clone();
                            Callback::from(move |_: MouseEvent| on_edit.emit(booking.clone()))
                        };

                        html! {
                            <tr key={booking.id.to_string()}>
                                <td>{&booking.receipt_no}</td>
                                <td>{&booking.applicant_name}</td>
                                <td>{&booking.mobile_no}</td>
                                <td>{&booking.email}</td>
                                <td>{&booking.hall_name}</td>
                                <td>{&booking.purpose}</td>
                                <td>{booking.rent.to_string()}</td>
                                <td>{optional_amount(booking.additional_charges)}</td>
                                <td>{booking.total.to_string()}</td>
                                <td>{booking.remark.clone().unwrap_or_default()}</td>
                                <td>{booking.receipt_date.format("%Y-%m-%d").to_string()}</td>
                                <td>
                                    <button onclick={on_edit}>{"Edit"}</button>
                                </td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        </>
    }
}
