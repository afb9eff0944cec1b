pub mod certificate;
pub mod email;
pub mod qr;
