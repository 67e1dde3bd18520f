//! 预导入模块，方便使用

pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::departments::{
    ActiveModel as DepartmentActiveModel, Entity as Departments, Model as DepartmentModel,
};
pub use super::grades::{ActiveModel as GradeActiveModel, Entity as Grades, Model as GradeModel};
pub use super::main_problems::{
    ActiveModel as MainProblemActiveModel, Entity as MainProblems, Model as MainProblemModel,
};
pub use super::stream_subjects::{
    ActiveModel as StreamSubjectActiveModel, Entity as StreamSubjects, Model as StreamSubjectModel,
};
pub use super::streams::{
    ActiveModel as StreamActiveModel, Entity as Streams, Model as StreamModel,
};
pub use super::sub_problems::{
    ActiveModel as SubProblemActiveModel, Entity as SubProblems, Model as SubProblemModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
