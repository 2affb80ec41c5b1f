pub mod booking_form;
pub mod booking_table;

pub use booking_form::BookingFormPanel;
pub use booking_table::BookingTable;
