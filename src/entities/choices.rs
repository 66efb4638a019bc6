//! Choice enumerations used by the record definitions.
//!
//! Each variant is stored as its lowercase value string and rendered with a
//! human label in forms and list pages.

use sea_orm::entity::prelude::*;
use sea_orm::Iterable;
use serde::{Deserialize, Serialize};

/// A closed set of `(value, label)` pairs backed by a string column.
pub trait Choice: ActiveEnum<Value = String> + Iterable + Copy + 'static {
    fn label(self) -> &'static str;

    fn as_value(self) -> String {
        self.to_value()
    }

    /// Parse a submitted form or query value.
    fn parse(raw: &str) -> Option<Self> {
        Self::try_from_value(&raw.to_string()).ok()
    }

    fn options() -> Vec<(String, &'static str)> {
        Self::iter().map(|c| (c.to_value(), c.label())).collect()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum Location {
    #[sea_orm(string_value = "chennai")]
    Chennai,
    #[sea_orm(string_value = "bangalore")]
    Bangalore,
    #[sea_orm(string_value = "hyderabad")]
    Hyderabad,
    #[sea_orm(string_value = "others")]
    Others,
}

impl Choice for Location {
    fn label(self) -> &'static str {
        match self {
            Self::Chennai => "Chennai",
            Self::Bangalore => "Bangalore",
            Self::Hyderabad => "Hyderabad",
            Self::Others => "Others",
        }
    }
}

/// Job portal a company lead came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum Portal {
    #[sea_orm(string_value = "naukri")]
    Naukri,
    #[sea_orm(string_value = "linkedin")]
    Linkedin,
    #[sea_orm(string_value = "glassdoor")]
    Glassdoor,
    #[sea_orm(string_value = "indeed")]
    Indeed,
    #[sea_orm(string_value = "placement_india")]
    PlacementIndia,
    #[sea_orm(string_value = "freshersworld")]
    Freshersworld,
    #[sea_orm(string_value = "shine")]
    Shine,
    #[sea_orm(string_value = "many_jobs")]
    ManyJobs,
    #[sea_orm(string_value = "internshala")]
    Internshala,
    #[sea_orm(string_value = "quickr_jobs")]
    QuickrJobs,
    #[sea_orm(string_value = "google_jobs")]
    GoogleJobs,
    #[sea_orm(string_value = "monster")]
    Monster,
    #[sea_orm(string_value = "company_website")]
    CompanyWebsite,
    #[sea_orm(string_value = "others")]
    Others,
}

impl Choice for Portal {
    fn label(self) -> &'static str {
        match self {
            Self::Naukri => "Naukri",
            Self::Linkedin => "LinkedIn",
            Self::Glassdoor => "Glassdoor",
            Self::Indeed => "Indeed",
            Self::PlacementIndia => "Placement India",
            Self::Freshersworld => "Freshersworld",
            Self::Shine => "Shine",
            Self::ManyJobs => "Many Jobs",
            Self::Internshala => "Internshala",
            Self::QuickrJobs => "Quickr Jobs",
            Self::GoogleJobs => "Google Jobs",
            Self::Monster => "Monster",
            Self::CompanyWebsite => "Company Website",
            Self::Others => "Others",
        }
    }
}

/// Placement progress of a company lead.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum Progress {
    #[sea_orm(string_value = "resume_shared")]
    ResumeShared,
    #[sea_orm(string_value = "interview_scheduling")]
    InterviewScheduling,
    #[sea_orm(string_value = "interview_not_conducted")]
    InterviewNotConducted,
    #[sea_orm(string_value = "interview_completed")]
    InterviewCompleted,
}

impl Choice for Progress {
    fn label(self) -> &'static str {
        match self {
            Self::ResumeShared => "Resume Shared",
            Self::InterviewScheduling => "Interview Scheduling",
            Self::InterviewNotConducted => "Interview Not Conducted",
            Self::InterviewCompleted => "Interview Completed",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum RoundType {
    #[sea_orm(string_value = "aptitude")]
    Aptitude,
    #[sea_orm(string_value = "gd")]
    Gd,
    #[sea_orm(string_value = "technical")]
    Technical,
    #[sea_orm(string_value = "hr")]
    Hr,
    #[sea_orm(string_value = "task")]
    Task,
}

impl Choice for RoundType {
    fn label(self) -> &'static str {
        match self {
            Self::Aptitude => "Aptitude",
            Self::Gd => "Group Discussion",
            Self::Technical => "Technical",
            Self::Hr => "HR",
            Self::Task => "Task Work",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum Venue {
    #[sea_orm(string_value = "online")]
    Online,
    #[sea_orm(string_value = "offline")]
    Offline,
}

impl Choice for Venue {
    fn label(self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
        }
    }
}

/// Outcome of one student in one interview round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "not_attended")]
    NotAttended,
    #[sea_orm(string_value = "selected")]
    Selected,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "placed")]
    Placed,
}

impl OutcomeStatus {
    /// Statuses that must be explained with a reason.
    pub fn needs_reason(self) -> bool {
        matches!(self, Self::NotAttended | Self::Rejected)
    }
}

impl Choice for OutcomeStatus {
    fn label(self) -> &'static str {
        match self {
            Self::InProgress => "In Progress",
            Self::NotAttended => "Not Attended",
            Self::Selected => "Selected",
            Self::Rejected => "Rejected",
            Self::Placed => "Placed",
        }
    }
}

/// Tamil Nadu cities a trainer can be based in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum TrainerLocation {
    #[sea_orm(string_value = "chennai")]
    Chennai,
    #[sea_orm(string_value = "coimbatore")]
    Coimbatore,
    #[sea_orm(string_value = "madurai")]
    Madurai,
    #[sea_orm(string_value = "tiruchirappalli")]
    Tiruchirappalli,
    #[sea_orm(string_value = "salem")]
    Salem,
    #[sea_orm(string_value = "tirunelveli")]
    Tirunelveli,
    #[sea_orm(string_value = "erode")]
    Erode,
    #[sea_orm(string_value = "vellore")]
    Vellore,
    #[sea_orm(string_value = "thoothukudi")]
    Thoothukudi,
    #[sea_orm(string_value = "thanjavur")]
    Thanjavur,
}

impl Choice for TrainerLocation {
    fn label(self) -> &'static str {
        match self {
            Self::Chennai => "Chennai",
            Self::Coimbatore => "Coimbatore",
            Self::Madurai => "Madurai",
            Self::Tiruchirappalli => "Tiruchirappalli",
            Self::Salem => "Salem",
            Self::Tirunelveli => "Tirunelveli",
            Self::Erode => "Erode",
            Self::Vellore => "Vellore",
            Self::Thoothukudi => "Thoothukudi",
            Self::Thanjavur => "Thanjavur",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    #[sea_orm(string_value = "full_day")]
    FullDay,
    #[sea_orm(string_value = "morning")]
    Morning,
    #[sea_orm(string_value = "evening")]
    Evening,
    #[sea_orm(string_value = "weekends")]
    Weekends,
}

impl Choice for Availability {
    fn label(self) -> &'static str {
        match self {
            Self::FullDay => "Full Day",
            Self::Morning => "Morning",
            Self::Evening => "Evening",
            Self::Weekends => "Weekends",
        }
    }
}

/// How a trainer delivers sessions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[sea_orm(string_value = "online")]
    Online,
    #[sea_orm(string_value = "offline")]
    Offline,
    #[sea_orm(string_value = "hybrid")]
    Hybrid,
}

impl Choice for Mode {
    fn label(self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
            Self::Hybrid => "Hybrid",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    #[sea_orm(string_value = "full_time")]
    FullTime,
    #[sea_orm(string_value = "part_time")]
    PartTime,
    #[sea_orm(string_value = "freelance")]
    Freelance,
}

impl Choice for EmploymentType {
    fn label(self) -> &'static str {
        match self {
            Self::FullTime => "Full Time",
            Self::PartTime => "Part Time",
            Self::Freelance => "Freelance",
        }
    }
}
