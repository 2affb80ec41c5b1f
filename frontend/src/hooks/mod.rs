pub mod use_bookings;
