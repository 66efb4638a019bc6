use chrono::{NaiveDate, NaiveTime};
use placement_desk::entities::choices::{
    Availability, EmploymentType, Location, Mode, Portal, Progress, RoundType, TrainerLocation,
    Venue,
};
use placement_desk::entities::{company, interview, trainer};
use placement_desk::storage::{self, CompanyInput, InterviewInput, TrainerInput};
use sea_orm::DatabaseConnection;

/// Builder for creating test trainers
pub struct TrainerBuilder {
    input: TrainerInput,
}

impl TrainerBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            input: TrainerInput {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
                phone_number: "9876543210".to_string(),
                stack: Vec::new(),
                location: TrainerLocation::Chennai,
                years_of_experience: 2,
                availability: Availability::FullDay,
                mode: Mode::Offline,
                employment_type: EmploymentType::FullTime,
                timing_slots: Vec::new(),
            },
        }
    }

    pub fn with_stack(mut self, course_ids: &[i32]) -> Self {
        self.input.stack = course_ids.to_vec();
        self
    }

    pub fn located(mut self, location: TrainerLocation) -> Self {
        self.input.location = location;
        self
    }

    pub fn with_experience(mut self, years: i32) -> Self {
        self.input.years_of_experience = years;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.input.mode = mode;
        self
    }

    pub fn available(mut self, availability: Availability) -> Self {
        self.input.availability = availability;
        self
    }

    pub fn employed(mut self, employment_type: EmploymentType) -> Self {
        self.input.employment_type = employment_type;
        self
    }

    pub fn with_slots(mut self, slots: &[&str]) -> Self {
        self.input.timing_slots = slots.iter().map(|s| s.to_string()).collect();
        self
    }

    pub async fn create(self, db: &DatabaseConnection) -> trainer::Model {
        storage::trainers::create_trainer(db, self.input)
            .await
            .expect("Failed to create test trainer")
    }
}

/// Builder for creating test companies
pub struct CompanyBuilder {
    input: CompanyInput,
}

impl CompanyBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            input: CompanyInput {
                date: NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date"),
                portal: Portal::Naukri,
                other_portal: None,
                company_name: name.to_string(),
                spoc: "Priya".to_string(),
                mobile: "9000000000".to_string(),
                email: "hr@example.com".to_string(),
                location: Location::Chennai,
                other_location: None,
                progress: Progress::ResumeShared,
            },
        }
    }

    pub fn located(mut self, location: Location) -> Self {
        self.input.location = location;
        self
    }

    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.input.progress = progress;
        self
    }

    pub async fn create(self, db: &DatabaseConnection) -> company::Model {
        storage::companies::create_company(db, self.input, None)
            .await
            .expect("Failed to create test company")
    }
}

/// Builder for creating test interviews
pub struct InterviewBuilder {
    input: InterviewInput,
}

impl InterviewBuilder {
    pub fn new(company_id: i32) -> Self {
        Self {
            input: InterviewInput {
                venue: Venue::Offline,
                company_id,
                applying_role: "Software Engineer".to_string(),
                courses: Vec::new(),
                interview_round: RoundType::Technical,
                round_number: 1,
                parent_interview_id: None,
                location: Location::Chennai,
                other_location: None,
                interview_date: NaiveDate::from_ymd_opt(2025, 4, 1).expect("valid date"),
                interview_time: NaiveTime::from_hms_opt(10, 0, 0).expect("valid time"),
            },
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.input.interview_date = date;
        self
    }

    pub fn with_courses(mut self, course_ids: &[i32]) -> Self {
        self.input.courses = course_ids.to_vec();
        self
    }

    pub fn sub_round_of(mut self, parent: &interview::Model) -> Self {
        self.input.parent_interview_id = Some(parent.id);
        self.input.round_number = parent.round_number + 1;
        self
    }

    pub async fn create(self, db: &DatabaseConnection) -> interview::Model {
        storage::interviews::create_interview(db, self.input, None)
            .await
            .expect("Failed to create test interview")
    }
}
