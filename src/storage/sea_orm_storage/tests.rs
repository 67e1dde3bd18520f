use super::SeaOrmStorage;
use crate::errors::SchoolDeskError;
use crate::models::{
    PaginationQuery,
    classes::requests::{ClassListQuery, CreateClassRequest},
    departments::requests::DepartmentQueryParams,
    grades::responses::{GradeDeleteResponse, SubjectDeleteResponse},
    teachers::requests::TeacherListQuery,
    users::{
        entities::UserRole,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
    },
};

async fn storage() -> SeaOrmStorage {
    SeaOrmStorage::connect("sqlite::memory:", 1, 5)
        .await
        .unwrap()
}

fn user_request(username: &str, role: UserRole) -> CreateUserRequest {
    CreateUserRequest {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: "hash".to_string(),
        role: Some(role),
        is_approved: None,
        department_id: None,
        profile_name: None,
        phone: None,
    }
}

fn class_request(name: &str, grade_id: i64, subject_id: i64, teacher_id: Option<i64>) -> CreateClassRequest {
    CreateClassRequest {
        name: name.to_string(),
        grade_id,
        subject_id,
        teacher_id,
    }
}

#[test]
fn test_build_database_url() {
    assert_eq!(
        SeaOrmStorage::build_database_url("school.db").unwrap(),
        "sqlite://school.db?mode=rwc"
    );
    assert_eq!(
        SeaOrmStorage::build_database_url(":memory:").unwrap(),
        "sqlite::memory:"
    );
    assert!(SeaOrmStorage::build_database_url("postgres://localhost/school").is_ok());
    assert!(SeaOrmStorage::build_database_url("ftp://nowhere").is_err());
}

#[tokio::test]
async fn test_duplicate_username_is_conflict() {
    let storage = storage().await;
    let user = storage
        .create_user_impl(user_request("alice", UserRole::User))
        .await
        .unwrap();
    assert!(user.is_approved);
    assert_eq!(user.role, UserRole::User);

    let err = storage
        .create_user_impl(user_request("alice", UserRole::Teacher))
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolDeskError::Conflict(_)));
}

#[tokio::test]
async fn test_user_list_filters() {
    let storage = storage().await;
    storage
        .create_user_impl(user_request("citizen", UserRole::User))
        .await
        .unwrap();
    let mut pending = user_request("pending", UserRole::Teacher);
    pending.is_approved = Some(false);
    storage.create_user_impl(pending).await.unwrap();

    let result = storage
        .list_users_with_pagination_impl(UserListQuery {
            approved: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(result.pagination.total, 1);
    assert_eq!(result.items[0].username, "pending");

    let result = storage
        .list_users_with_pagination_impl(UserListQuery {
            search: Some("citi".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(result.items.len(), 1);
}

#[tokio::test]
async fn test_approval_toggle() {
    let storage = storage().await;
    let mut req = user_request("bob", UserRole::Teacher);
    req.is_approved = Some(false);
    let teacher = storage.create_user_impl(req).await.unwrap();
    assert!(!teacher.can_sign_in());

    let approved = storage
        .set_user_approval_impl(teacher.id, true)
        .await
        .unwrap()
        .unwrap();
    assert!(approved.can_sign_in());
    assert!(storage.set_user_approval_impl(999, true).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_main_problem_removes_sub_problems() {
    let storage = storage().await;
    let water = storage
        .create_main_problem_impl("Water".to_string())
        .await
        .unwrap();
    let roads = storage
        .create_main_problem_impl("Roads".to_string())
        .await
        .unwrap();
    storage
        .create_sub_problem_impl(water.id, "Leak".to_string())
        .await
        .unwrap();
    storage
        .create_sub_problem_impl(water.id, "Outage".to_string())
        .await
        .unwrap();
    let pothole = storage
        .create_sub_problem_impl(roads.id, "Pothole".to_string())
        .await
        .unwrap();

    let removed = storage
        .delete_main_problem_impl(water.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(removed.removed_sub_problems, 2);
    assert!(storage.list_sub_problems_impl(water.id).await.unwrap().is_empty());
    assert!(
        storage
            .get_sub_problem_by_id_impl(pothole.id)
            .await
            .unwrap()
            .is_some()
    );
    assert!(storage.delete_main_problem_impl(water.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_sub_problem_names_unique_per_parent() {
    let storage = storage().await;
    let a = storage.create_main_problem_impl("A".to_string()).await.unwrap();
    let b = storage.create_main_problem_impl("B".to_string()).await.unwrap();
    storage
        .create_sub_problem_impl(a.id, "Same".to_string())
        .await
        .unwrap();
    storage
        .create_sub_problem_impl(b.id, "Same".to_string())
        .await
        .unwrap();

    let err = storage
        .create_sub_problem_impl(a.id, "Same".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolDeskError::Conflict(_)));
}

#[tokio::test]
async fn test_delete_grade_cascades() {
    let storage = storage().await;
    let grade = storage.create_grade_impl("Grade 10".to_string()).await.unwrap();
    let other = storage.create_grade_impl("Grade 11".to_string()).await.unwrap();
    let math = storage
        .create_subject_impl(grade.id, "Math".to_string())
        .await
        .unwrap();
    let physics = storage
        .create_subject_impl(grade.id, "Physics".to_string())
        .await
        .unwrap();
    let science = storage
        .create_stream_impl(grade.id, "Science".to_string())
        .await
        .unwrap();
    storage
        .link_stream_subject_impl(science.id, math.id)
        .await
        .unwrap();
    storage
        .link_stream_subject_impl(science.id, physics.id)
        .await
        .unwrap();
    storage
        .create_class_impl(class_request("10A", grade.id, math.id, None))
        .await
        .unwrap();

    let other_subject = storage
        .create_subject_impl(other.id, "Math".to_string())
        .await
        .unwrap();
    storage
        .create_class_impl(class_request("11A", other.id, other_subject.id, None))
        .await
        .unwrap();

    let removed = storage.delete_grade_impl(grade.id).await.unwrap().unwrap();
    assert_eq!(
        removed,
        GradeDeleteResponse {
            id: grade.id,
            removed_subjects: 2,
            removed_streams: 1,
            removed_stream_links: 2,
            removed_classes: 1,
        }
    );

    assert!(storage.get_subject_by_id_impl(math.id).await.unwrap().is_none());
    assert!(storage.get_stream_by_id_impl(science.id).await.unwrap().is_none());
    let remaining = storage
        .list_classes_with_pagination_impl(ClassListQuery::default())
        .await
        .unwrap();
    assert_eq!(remaining.pagination.total, 1);
    assert_eq!(remaining.items[0].grade_id, other.id);
}

#[tokio::test]
async fn test_delete_subject_removes_links_and_classes() {
    let storage = storage().await;
    let grade = storage.create_grade_impl("Grade 9".to_string()).await.unwrap();
    let chemistry = storage
        .create_subject_impl(grade.id, "Chemistry".to_string())
        .await
        .unwrap();
    let stream = storage
        .create_stream_impl(grade.id, "Science".to_string())
        .await
        .unwrap();
    storage
        .link_stream_subject_impl(stream.id, chemistry.id)
        .await
        .unwrap();
    storage
        .create_class_impl(class_request("9C", grade.id, chemistry.id, None))
        .await
        .unwrap();

    let removed = storage
        .delete_subject_impl(chemistry.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        removed,
        SubjectDeleteResponse {
            id: chemistry.id,
            removed_stream_links: 1,
            removed_classes: 1,
        }
    );
    assert!(storage.get_stream_by_id_impl(stream.id).await.unwrap().is_some());
    assert!(
        storage
            .list_stream_subjects_impl(stream.id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_stream_subject_links() {
    let storage = storage().await;
    let grade = storage.create_grade_impl("Grade 12".to_string()).await.unwrap();
    let biology = storage
        .create_subject_impl(grade.id, "Biology".to_string())
        .await
        .unwrap();
    let stream = storage
        .create_stream_impl(grade.id, "Medical".to_string())
        .await
        .unwrap();

    storage
        .link_stream_subject_impl(stream.id, biology.id)
        .await
        .unwrap();
    let err = storage
        .link_stream_subject_impl(stream.id, biology.id)
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolDeskError::Conflict(_)));

    let subjects = storage.list_stream_subjects_impl(stream.id).await.unwrap();
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0].name, "Biology");

    assert!(
        storage
            .unlink_stream_subject_impl(stream.id, biology.id)
            .await
            .unwrap()
    );
    assert!(
        !storage
            .unlink_stream_subject_impl(stream.id, biology.id)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_delete_department_detaches_users() {
    let storage = storage().await;
    let department = storage
        .create_department_impl("Sanitation".to_string())
        .await
        .unwrap();
    let mut req = user_request("worker", UserRole::User);
    req.department_id = Some(department.id);
    let user = storage.create_user_impl(req).await.unwrap();
    assert_eq!(user.department_id, Some(department.id));

    let err = storage
        .create_department_impl("Sanitation".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolDeskError::Conflict(_)));

    assert!(storage.delete_department_impl(department.id).await.unwrap());
    let user = storage.get_user_by_id_impl(user.id).await.unwrap().unwrap();
    assert_eq!(user.department_id, None);

    let list = storage
        .list_departments_with_pagination_impl(DepartmentQueryParams {
            pagination: PaginationQuery::default(),
            search: None,
        })
        .await
        .unwrap();
    assert_eq!(list.pagination.total, 0);
}

#[tokio::test]
async fn test_teacher_listing_and_unassign_on_delete() {
    let storage = storage().await;
    let teacher = storage
        .create_user_impl(user_request("teacher1", UserRole::Teacher))
        .await
        .unwrap();
    storage
        .create_user_impl(user_request("citizen", UserRole::User))
        .await
        .unwrap();
    let grade = storage.create_grade_impl("Grade 8".to_string()).await.unwrap();
    let subject = storage
        .create_subject_impl(grade.id, "History".to_string())
        .await
        .unwrap();
    let class = storage
        .create_class_impl(class_request("8A", grade.id, subject.id, Some(teacher.id)))
        .await
        .unwrap();
    storage
        .create_class_impl(class_request("8B", grade.id, subject.id, Some(teacher.id)))
        .await
        .unwrap();

    let teachers = storage
        .list_teachers_with_pagination_impl(TeacherListQuery::default())
        .await
        .unwrap();
    assert_eq!(teachers.pagination.total, 1);
    assert_eq!(teachers.items[0].class_count, 2);

    let err = storage
        .create_class_impl(class_request("8A", grade.id, subject.id, None))
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolDeskError::Conflict(_)));

    assert!(storage.delete_user_impl(teacher.id).await.unwrap());
    let class = storage.get_class_by_id_impl(class.id).await.unwrap().unwrap();
    assert_eq!(class.teacher_id, None);
}

#[tokio::test]
async fn test_assign_teacher() {
    let storage = storage().await;
    let teacher = storage
        .create_user_impl(user_request("teacher2", UserRole::Teacher))
        .await
        .unwrap();
    let grade = storage.create_grade_impl("Grade 7".to_string()).await.unwrap();
    let subject = storage
        .create_subject_impl(grade.id, "Art".to_string())
        .await
        .unwrap();
    let class = storage
        .create_class_impl(class_request("7A", grade.id, subject.id, None))
        .await
        .unwrap();

    let assigned = storage
        .assign_class_teacher_impl(class.id, Some(teacher.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assigned.teacher_id, Some(teacher.id));

    let mine = storage
        .list_classes_with_pagination_impl(ClassListQuery {
            teacher_id: Some(teacher.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(mine.items.len(), 1);

    let cleared = storage
        .assign_class_teacher_impl(class.id, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.teacher_id, None);
    assert!(
        storage
            .assign_class_teacher_impl(12345, None)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_demoting_teacher_unassigns_classes() {
    let storage = storage().await;
    let teacher = storage
        .create_user_impl(user_request("teacher3", UserRole::Teacher))
        .await
        .unwrap();
    let grade = storage.create_grade_impl("Grade 6".to_string()).await.unwrap();
    let subject = storage
        .create_subject_impl(grade.id, "Music".to_string())
        .await
        .unwrap();
    let class = storage
        .create_class_impl(class_request("6A", grade.id, subject.id, Some(teacher.id)))
        .await
        .unwrap();

    // 仅修改资料不影响任课
    storage
        .update_user_impl(
            teacher.id,
            UpdateUserRequest {
                role: Some(UserRole::Teacher),
                phone: Some("555-0100".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let kept = storage.get_class_by_id_impl(class.id).await.unwrap().unwrap();
    assert_eq!(kept.teacher_id, Some(teacher.id));

    let demoted = storage
        .update_user_impl(
            teacher.id,
            UpdateUserRequest {
                role: Some(UserRole::User),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(demoted.role, UserRole::User);

    let class = storage.get_class_by_id_impl(class.id).await.unwrap().unwrap();
    assert_eq!(class.teacher_id, None);
}
