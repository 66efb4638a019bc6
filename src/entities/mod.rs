pub mod choices;
pub mod company;
pub mod course;
pub mod interview;
pub mod interview_course;
pub mod interview_student;
pub mod student;
pub mod trainer;
pub mod trainer_stack;
pub mod user;

pub use company::Entity as Company;
pub use course::Entity as Course;
pub use interview::Entity as Interview;
pub use interview_course::Entity as InterviewCourse;
pub use interview_student::Entity as InterviewStudent;
pub use student::Entity as Student;
pub use trainer::Entity as Trainer;
pub use trainer_stack::Entity as TrainerStack;
pub use user::Entity as User;
