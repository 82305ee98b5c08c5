pub mod emailjs;
pub mod simulated;
