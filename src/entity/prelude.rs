//! 预导入模块，方便使用

pub use super::admins::{ActiveModel as AdminActiveModel, Entity as Admins, Model as AdminModel};
pub use super::monthly_schedules::{
    ActiveModel as MonthlyScheduleActiveModel, Entity as MonthlySchedules,
    Model as MonthlyScheduleModel,
};
pub use super::reservations::{
    ActiveModel as ReservationActiveModel, Entity as Reservations, Model as ReservationModel,
};
pub use super::schedules::{
    ActiveModel as ScheduleActiveModel, Entity as Schedules, Model as ScheduleModel,
};
pub use super::student_comments::{
    ActiveModel as StudentCommentActiveModel, Entity as StudentComments,
    Model as StudentCommentModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::subject_teachers::{
    ActiveModel as SubjectTeacherActiveModel, Entity as SubjectTeachers,
    Model as SubjectTeacherModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::teacher_comments::{
    ActiveModel as TeacherCommentActiveModel, Entity as TeacherComments,
    Model as TeacherCommentModel,
};
pub use super::teachers::{
    ActiveModel as TeacherActiveModel, Entity as Teachers, Model as TeacherModel,
};
