pub mod session_record;
