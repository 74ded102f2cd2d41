//! Lead-generation links: phone, e-mail and prefilled WhatsApp inquiries.

use chrono::NaiveDate;
use serde::Serialize;
use url::form_urlencoded;

use crate::vehicle::Car;

pub const WHATSAPP_BASE_URL: &str = "https://api.whatsapp.com/send";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Company {
    pub name: &'static str,
    pub tagline: &'static str,
    /// Display form.
    pub phone: &'static str,
    /// Digits only, used in `tel:` and WhatsApp links.
    pub phone_clean: &'static str,
    pub email: &'static str,
    pub address: &'static str,
    pub website: &'static str,
}

pub const COMPANY: Company = Company {
    name: "Uptown Rent a Car",
    tagline: "Drive Your Dream",
    phone: "+971 58 68 77777",
    phone_clean: "971586877777",
    email: "info@uptowndxb.com",
    address: "Dubai, United Arab Emirates",
    website: "https://uptowndxb.com",
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactLinks {
    pub company: Company,
    pub message: String,
    pub whatsapp_url: String,
    pub tel_url: String,
    pub mailto_url: String,
}

/// Inquiry text: greeting, the vehicle when chosen, the rental dates when
/// a start date is given, and the closing request.
pub fn inquiry_message(car: Option<&Car>, from: Option<NaiveDate>, to: Option<NaiveDate>) -> String {
    let mut message = match car {
        Some(car) => format!(
            "Hello {}, I'm interested in renting the {} ({}).",
            COMPANY.name, car.name, car.year
        ),
        None => format!("Hello {}, I'm interested in renting a car.", COMPANY.name),
    };
    match (from, to) {
        (Some(from), Some(to)) => message.push_str(&format!(" From {from} to {to}.")),
        (Some(from), None) => message.push_str(&format!(" Starting from {from}.")),
        // An end date alone says nothing useful.
        (None, _) => {},
    }
    message.push_str(" Please share availability and pricing.");
    message
}

pub fn whatsapp_url(phone_clean: &str, message: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("phone", phone_clean)
        .append_pair("text", message)
        .finish();
    format!("{WHATSAPP_BASE_URL}?{query}")
}

pub fn tel_url(phone_clean: &str) -> String {
    format!("tel:+{phone_clean}")
}

pub fn contact_links(car: Option<&Car>, from: Option<NaiveDate>, to: Option<NaiveDate>) -> ContactLinks {
    let message = inquiry_message(car, from, to);
    ContactLinks {
        company: COMPANY,
        whatsapp_url: whatsapp_url(COMPANY.phone_clean, &message),
        tel_url: tel_url(COMPANY.phone_clean),
        mailto_url: format!("mailto:{}", COMPANY.email),
        message,
    }
}
