//! Form parsing and validation.
//!
//! Each form keeps the raw submitted strings so an invalid submission can be
//! rendered back unchanged, and turns into a storage input only once every
//! field checks out.

use crate::entities::choices::{
    Availability, Choice, EmploymentType, Location, Mode, OutcomeStatus, Portal, Progress,
    RoundType, TrainerLocation, Venue,
};
use crate::entities::{company, course, interview};
use crate::errors::PlacementError;
use crate::storage::{CompanyInput, InterviewInput, TrainerRow, TrainerInput};
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;

const REQUIRED: &str = "This field is required.";
const BAD_CHOICE: &str = "Select a valid choice.";

/// Submitted `application/x-www-form-urlencoded` pairs, repeated keys kept.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Last value for `key`, trimmed; empty when missing.
    pub fn get(&self, key: &str) -> String {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.trim().to_string())
            .unwrap_or_default()
    }

    pub fn get_all(&self, key: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, v)| k == key && !v.trim().is_empty())
            .map(|(_, v)| v.trim().to_string())
            .collect()
    }

    pub fn has(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }
}

/// Error messages per field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        self.0.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }

    /// Field errors raised by storage checks; other errors pass through.
    pub fn from_storage(err: PlacementError) -> Result<Self, PlacementError> {
        match err {
            PlacementError::Validation { field, message } => {
                let mut errors = Self::default();
                errors.add(field, message);
                Ok(errors)
            }
            other => Err(other),
        }
    }
}

fn required(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.add(field, REQUIRED);
    }
}

fn choice<T: Choice>(errors: &mut FieldErrors, field: &'static str, raw: &str) -> Option<T> {
    if raw.is_empty() {
        errors.add(field, REQUIRED);
        return None;
    }
    let parsed = T::parse(raw);
    if parsed.is_none() {
        errors.add(field, BAD_CHOICE);
    }
    parsed
}

pub fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}

fn email(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.add(field, REQUIRED);
    } else if !looks_like_email(value) {
        errors.add(field, "Enter a valid email address.");
    }
}

fn phone(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.add(field, REQUIRED);
    } else if value.chars().count() > 15 {
        errors.add(field, "Ensure this value has at most 15 characters.");
    } else if !value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' '))
    {
        errors.add(field, "Use digits, '+', '-' and spaces only.");
    }
}

/// `other_*` text is required for `others` and dropped for every other choice.
fn other_text(
    errors: &mut FieldErrors,
    field: &'static str,
    is_others: bool,
    value: &str,
) -> Option<String> {
    if !is_others {
        return None;
    }
    if value.is_empty() {
        errors.add(field, "Specify a value when choosing Others.");
        return None;
    }
    Some(value.to_string())
}

fn course_ids(
    errors: &mut FieldErrors,
    field: &'static str,
    raw: &[String],
    known: &[course::Model],
) -> Vec<i32> {
    if raw.is_empty() {
        errors.add(field, REQUIRED);
        return Vec::new();
    }
    let mut ids = Vec::with_capacity(raw.len());
    for value in raw {
        match value.parse::<i32>() {
            Ok(id) if known.iter().any(|c| c.id == id) => ids.push(id),
            _ => {
                errors.add(
                    field,
                    format!("Select a valid choice. {value} is not one of the available choices."),
                );
                return Vec::new();
            }
        }
    }
    ids
}

fn date(errors: &mut FieldErrors, field: &'static str, raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        errors.add(field, REQUIRED);
        return None;
    }
    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok();
    if parsed.is_none() {
        errors.add(field, "Enter a valid date (YYYY-MM-DD).");
    }
    parsed
}

fn time(errors: &mut FieldErrors, field: &'static str, raw: &str) -> Option<NaiveTime> {
    if raw.is_empty() {
        errors.add(field, REQUIRED);
        return None;
    }
    let parsed = NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok();
    if parsed.is_none() {
        errors.add(field, "Enter a valid time (HH:MM).");
    }
    parsed
}

// Trainers

#[derive(Debug, Clone, Default)]
pub struct TrainerForm {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub stack: Vec<String>,
    pub location: String,
    pub years_of_experience: String,
    pub availability: String,
    pub mode: String,
    pub employment_type: String,
    /// JSON list, e.g. `["10:00-12:00"]`.
    pub timing_slots: String,
}

impl TrainerForm {
    pub fn from_data(data: &FormData) -> Self {
        Self {
            name: data.get("name"),
            email: data.get("email"),
            phone_number: data.get("phone_number"),
            stack: data.get_all("stack"),
            location: data.get("location"),
            years_of_experience: data.get("years_of_experience"),
            availability: data.get("availability"),
            mode: data.get("mode"),
            employment_type: data.get("employment_type"),
            timing_slots: data.get("timing_slots"),
        }
    }

    pub fn from_row(row: &TrainerRow) -> Self {
        let t = &row.trainer;
        Self {
            name: t.name.clone(),
            email: t.email.clone(),
            phone_number: t.phone_number.clone(),
            stack: row.stack.iter().map(|c| c.id.to_string()).collect(),
            location: t.location.as_value(),
            years_of_experience: t.years_of_experience.to_string(),
            availability: t.availability.as_value(),
            mode: t.mode.as_value(),
            employment_type: t.employment_type.as_value(),
            timing_slots: serde_json::to_string(&t.slots()).unwrap_or_else(|_| "[]".to_string()),
        }
    }

    pub fn validate(&self, courses: &[course::Model]) -> Result<TrainerInput, FieldErrors> {
        let mut errors = FieldErrors::default();

        required(&mut errors, "name", &self.name);
        email(&mut errors, "email", &self.email);
        phone(&mut errors, "phone_number", &self.phone_number);
        let stack = course_ids(&mut errors, "stack", &self.stack, courses);
        let location = choice::<TrainerLocation>(&mut errors, "location", &self.location);
        let availability = choice::<Availability>(&mut errors, "availability", &self.availability);
        let mode = choice::<Mode>(&mut errors, "mode", &self.mode);
        let employment_type =
            choice::<EmploymentType>(&mut errors, "employment_type", &self.employment_type);

        let years = match self.years_of_experience.parse::<i32>() {
            Ok(years) if years >= 0 => Some(years),
            _ if self.years_of_experience.is_empty() => {
                errors.add("years_of_experience", REQUIRED);
                None
            }
            _ => {
                errors.add("years_of_experience", "Enter a whole number of years (0 or more).");
                None
            }
        };

        let slots = if self.timing_slots.is_empty() {
            Some(Vec::new())
        } else {
            match serde_json::from_str::<Vec<String>>(&self.timing_slots) {
                Ok(slots) => Some(
                    slots
                        .into_iter()
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect(),
                ),
                Err(_) => {
                    errors.add(
                        "timing_slots",
                        r#"Enter a JSON list of slots, e.g. ["10:00-12:00", "14:00-16:00"]."#,
                    );
                    None
                }
            }
        };

        match (location, availability, mode, employment_type, years, slots) {
            (
                Some(location),
                Some(availability),
                Some(mode),
                Some(employment_type),
                Some(years_of_experience),
                Some(timing_slots),
            ) => errors.into_result(|| TrainerInput {
                name: self.name.clone(),
                email: self.email.clone(),
                phone_number: self.phone_number.clone(),
                stack,
                location,
                years_of_experience,
                availability,
                mode,
                employment_type,
                timing_slots,
            }),
            _ => Err(errors),
        }
    }
}

// Companies

#[derive(Debug, Clone, Default)]
pub struct CompanyForm {
    pub date: String,
    pub portal: String,
    pub other_portal: String,
    pub company_name: String,
    pub spoc: String,
    pub mobile: String,
    pub email: String,
    pub location: String,
    pub other_location: String,
    pub progress: String,
}

impl CompanyForm {
    /// Blank form for a new company: today's date, progress `resume_shared`.
    pub fn initial(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            progress: Progress::ResumeShared.as_value(),
            ..Default::default()
        }
    }

    pub fn from_data(data: &FormData) -> Self {
        Self {
            date: data.get("date"),
            portal: data.get("portal"),
            other_portal: data.get("other_portal"),
            company_name: data.get("company_name"),
            spoc: data.get("spoc"),
            mobile: data.get("mobile"),
            email: data.get("email"),
            location: data.get("location"),
            other_location: data.get("other_location"),
            progress: data.get("progress"),
        }
    }

    pub fn from_model(model: &company::Model) -> Self {
        Self {
            date: model.date.format("%Y-%m-%d").to_string(),
            portal: model.portal.as_value(),
            other_portal: model.other_portal.clone().unwrap_or_default(),
            company_name: model.company_name.clone(),
            spoc: model.spoc.clone(),
            mobile: model.mobile.clone(),
            email: model.email.clone(),
            location: model.location.as_value(),
            other_location: model.other_location.clone().unwrap_or_default(),
            progress: model.progress.as_value(),
        }
    }

    /// A blank date means `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<CompanyInput, FieldErrors> {
        let mut errors = FieldErrors::default();

        let date = if self.date.is_empty() {
            Some(today)
        } else {
            date(&mut errors, "date", &self.date)
        };
        let portal = choice::<Portal>(&mut errors, "portal", &self.portal);
        let other_portal = other_text(
            &mut errors,
            "other_portal",
            portal == Some(Portal::Others),
            &self.other_portal,
        );
        required(&mut errors, "company_name", &self.company_name);
        required(&mut errors, "spoc", &self.spoc);
        phone(&mut errors, "mobile", &self.mobile);
        email(&mut errors, "email", &self.email);
        let location = choice::<Location>(&mut errors, "location", &self.location);
        let other_location = other_text(
            &mut errors,
            "other_location",
            location == Some(Location::Others),
            &self.other_location,
        );
        let progress = if self.progress.is_empty() {
            Some(Progress::ResumeShared)
        } else {
            choice::<Progress>(&mut errors, "progress", &self.progress)
        };

        match (date, portal, location, progress) {
            (Some(date), Some(portal), Some(location), Some(progress)) => {
                errors.into_result(|| CompanyInput {
                    date,
                    portal,
                    other_portal,
                    company_name: self.company_name.clone(),
                    spoc: self.spoc.clone(),
                    mobile: self.mobile.clone(),
                    email: self.email.clone(),
                    location,
                    other_location,
                    progress,
                })
            }
            _ => Err(errors),
        }
    }
}

// Interviews

#[derive(Debug, Clone, Default)]
pub struct InterviewForm {
    pub venue: String,
    pub company: String,
    pub applying_role: String,
    pub courses: Vec<String>,
    pub interview_round: String,
    pub round_number: String,
    pub parent_interview: String,
    pub location: String,
    pub other_location: String,
    pub interview_date: String,
    pub interview_time: String,
}

impl InterviewForm {
    /// Blank form, optionally pre-filled from a company or parent round.
    pub fn initial(company: Option<i32>, parent: Option<&interview::Model>) -> Self {
        let mut form = Self {
            venue: Venue::Offline.as_value(),
            round_number: "1".to_string(),
            company: company.map(|c| c.to_string()).unwrap_or_default(),
            ..Default::default()
        };
        if let Some(parent) = parent {
            form.company = parent.company_id.to_string();
            form.parent_interview = parent.id.to_string();
            form.applying_role = parent.applying_role.clone();
            form.round_number = (parent.round_number + 1).to_string();
            form.location = parent.location.as_value();
            form.other_location = parent.other_location.clone().unwrap_or_default();
        }
        form
    }

    pub fn from_data(data: &FormData) -> Self {
        Self {
            venue: data.get("venue"),
            company: data.get("company"),
            applying_role: data.get("applying_role"),
            courses: data.get_all("courses"),
            interview_round: data.get("interview_round"),
            round_number: data.get("round_number"),
            parent_interview: data.get("parent_interview"),
            location: data.get("location"),
            other_location: data.get("other_location"),
            interview_date: data.get("interview_date"),
            interview_time: data.get("interview_time"),
        }
    }

    pub fn from_model(model: &interview::Model, courses: &[course::Model]) -> Self {
        Self {
            venue: model.venue.as_value(),
            company: model.company_id.to_string(),
            applying_role: model.applying_role.clone(),
            courses: courses.iter().map(|c| c.id.to_string()).collect(),
            interview_round: model.interview_round.as_value(),
            round_number: model.round_number.to_string(),
            parent_interview: model
                .parent_interview_id
                .map(|p| p.to_string())
                .unwrap_or_default(),
            location: model.location.as_value(),
            other_location: model.other_location.clone().unwrap_or_default(),
            interview_date: model.interview_date.format("%Y-%m-%d").to_string(),
            interview_time: model.interview_time.format("%H:%M").to_string(),
        }
    }

    /// Company id as submitted, if it is a number.
    pub fn company_id(&self) -> Option<i32> {
        self.company.parse().ok()
    }

    /// Field-level checks. Company and parent consistency is checked by
    /// storage when the record is written.
    pub fn validate(&self, courses: &[course::Model]) -> Result<InterviewInput, FieldErrors> {
        let mut errors = FieldErrors::default();

        let venue = choice::<Venue>(&mut errors, "venue", &self.venue);
        let company_id = if self.company.is_empty() {
            errors.add("company", REQUIRED);
            None
        } else {
            let id = self.company_id();
            if id.is_none() {
                errors.add("company", BAD_CHOICE);
            }
            id
        };
        required(&mut errors, "applying_role", &self.applying_role);
        let course_ids = course_ids(&mut errors, "courses", &self.courses, courses);
        let round = choice::<RoundType>(&mut errors, "interview_round", &self.interview_round);

        let round_number = match self.round_number.parse::<i32>() {
            Ok(n) if n >= 1 => Some(n),
            _ if self.round_number.is_empty() => {
                errors.add("round_number", REQUIRED);
                None
            }
            _ => {
                errors.add("round_number", "Ensure this value is greater than or equal to 1.");
                None
            }
        };

        let parent = if self.parent_interview.is_empty() {
            Some(None)
        } else {
            match self.parent_interview.parse::<i32>() {
                Ok(id) => Some(Some(id)),
                Err(_) => {
                    errors.add("parent_interview", BAD_CHOICE);
                    None
                }
            }
        };

        let location = choice::<Location>(&mut errors, "location", &self.location);
        let other_location = other_text(
            &mut errors,
            "other_location",
            location == Some(Location::Others),
            &self.other_location,
        );
        let interview_date = date(&mut errors, "interview_date", &self.interview_date);
        let interview_time = time(&mut errors, "interview_time", &self.interview_time);

        match (
            venue,
            company_id,
            round,
            round_number,
            parent,
            location,
            interview_date,
            interview_time,
        ) {
            (
                Some(venue),
                Some(company_id),
                Some(interview_round),
                Some(round_number),
                Some(parent_interview_id),
                Some(location),
                Some(interview_date),
                Some(interview_time),
            ) => errors.into_result(|| InterviewInput {
                venue,
                company_id,
                applying_role: self.applying_role.clone(),
                courses: course_ids,
                interview_round,
                round_number,
                parent_interview_id,
                location,
                other_location,
                interview_date,
                interview_time,
            }),
            _ => Err(errors),
        }
    }
}

// Interview outcomes

#[derive(Debug, Clone, Default)]
pub struct OutcomeForm {
    pub status: String,
    pub reason: String,
    pub clear_offer_letter: bool,
}

/// Validated outcome fields; the offer letter is handled by the upload path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeInput {
    pub status: OutcomeStatus,
    pub reason: Option<String>,
    pub clear_offer_letter: bool,
}

impl OutcomeForm {
    pub fn from_model(status: OutcomeStatus, reason: Option<&str>) -> Self {
        Self {
            status: status.as_value(),
            reason: reason.unwrap_or_default().to_string(),
            clear_offer_letter: false,
        }
    }

    pub fn validate(&self) -> Result<OutcomeInput, FieldErrors> {
        let mut errors = FieldErrors::default();
        let status = choice::<OutcomeStatus>(&mut errors, "status", &self.status);

        if let Some(status) = status {
            if status.needs_reason() && self.reason.is_empty() {
                errors.add(
                    "reason",
                    format!("A reason is required when the status is {}.", status.label()),
                );
            }
        }

        match status {
            Some(status) => errors.into_result(|| OutcomeInput {
                status,
                reason: Some(self.reason.clone()).filter(|r| !r.is_empty()),
                clear_offer_letter: self.clear_offer_letter,
            }),
            None => Err(errors),
        }
    }
}

// Reference data

#[derive(Debug, Clone, Default)]
pub struct CourseForm {
    pub name: String,
}

impl CourseForm {
    pub fn from_data(data: &FormData) -> Self {
        Self {
            name: data.get("name"),
        }
    }

    pub fn validate(&self, name_taken: bool) -> Result<String, FieldErrors> {
        let mut errors = FieldErrors::default();
        required(&mut errors, "name", &self.name);
        if name_taken {
            errors.add("name", "A course with this name already exists.");
        }
        errors.into_result(|| self.name.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct StudentForm {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl StudentForm {
    pub fn from_data(data: &FormData) -> Self {
        Self {
            name: data.get("name"),
            email: data.get("email"),
            phone: data.get("phone"),
        }
    }

    /// Name, then optional email and phone.
    pub fn validate(&self) -> Result<(String, Option<String>, Option<String>), FieldErrors> {
        let mut errors = FieldErrors::default();
        required(&mut errors, "name", &self.name);
        if !self.email.is_empty() && !looks_like_email(&self.email) {
            errors.add("email", "Enter a valid email address.");
        }
        if !self.phone.is_empty() {
            phone(&mut errors, "phone", &self.phone);
        }
        errors.into_result(|| {
            (
                self.name.clone(),
                Some(self.email.clone()).filter(|e| !e.is_empty()),
                Some(self.phone.clone()).filter(|p| !p.is_empty()),
            )
        })
    }
}
