pub mod call;
pub mod fcm;
pub mod locale;
pub mod onesignal;
pub mod payload;
pub mod validation;
