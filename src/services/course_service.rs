use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{authorize, Action, Caller, Resource, ResourceKind},
    errors::{AppError, AppResult},
    models::{
        domain::{Announcement, Course, User},
        dto::{
            request::{AnnouncementRequest, CreateCourseRequest},
            response::{CourseMaterials, CourseSummary},
        },
    },
    repositories::{CourseRepository, UserRepository},
};

pub struct CourseService {
    courses: Arc<dyn CourseRepository>,
    users: Arc<dyn UserRepository>,
}

impl CourseService {
    pub fn new(courses: Arc<dyn CourseRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { courses, users }
    }

    async fn get_course(&self, id: &str) -> AppResult<Course> {
        self.courses
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Course with id '{}' not found", id)))
    }

    pub async fn list(&self) -> AppResult<Vec<CourseSummary>> {
        let courses = self.courses.find_all().await?;
        Ok(courses.into_iter().map(CourseSummary::from).collect())
    }

    pub async fn create(&self, caller: &Caller, request: CreateCourseRequest) -> AppResult<String> {
        authorize(
            Some(caller),
            &Resource::of_kind(ResourceKind::Course),
            Action::Create,
        )?;
        request.validate()?;

        let mut course = Course::new(&request.title, Some(&caller.id));
        course.description = request.description;
        course.price = request.price;
        course.schedule = request.schedule;
        course.level = request.level;
        course.materials = request.materials;

        let course = self.courses.create(course).await?;
        log::info!("Course '{}' created by '{}'", course.id, caller.username);
        Ok(course.id)
    }

    pub async fn delete(&self, caller: &Caller, id: &str) -> AppResult<()> {
        let course = self.get_course(id).await?;
        authorize(Some(caller), &Resource::course(&course, &[]), Action::Delete)?;

        self.courses.delete(&course.id).await?;
        log::info!("Course '{}' deleted by '{}'", course.id, caller.username);
        Ok(())
    }

    /// Enrolling twice is a no-op.
    pub async fn enroll(&self, user_id: &str, course_id: &str) -> AppResult<()> {
        let course = self.get_course(course_id).await?;
        self.users.add_enrollment(user_id, &course.id).await
    }

    pub async fn materials(&self, user: &User, course_id: &str) -> AppResult<CourseMaterials> {
        let course = self.get_course(course_id).await?;

        let members = if user.is_enrolled_in(&course.id) {
            vec![user.id.clone()]
        } else {
            Vec::new()
        };
        authorize(
            Some(&Caller::from(user)),
            &Resource::course(&course, &members),
            Action::ViewPrivileged,
        )?;

        Ok(CourseMaterials {
            course_id: course.id,
            title: course.title,
            materials: course.materials,
            announcements: course.announcements,
        })
    }

    /// Instructor or admin only. Appends to the course's announcement board.
    pub async fn post_announcement(
        &self,
        caller: &Caller,
        course_id: &str,
        request: AnnouncementRequest,
    ) -> AppResult<()> {
        let course = self.get_course(course_id).await?;
        authorize(
            Some(caller),
            &Resource::course(&course, &[]),
            Action::AppendSubresource,
        )?;
        request.validate()?;

        let content = request.content.trim();
        if content.is_empty() {
            return Err(AppError::ValidationError(
                "Announcement content is required".to_string(),
            ));
        }

        let announcement = Announcement::new(content, &caller.username);
        self.courses.add_announcement(&course.id, announcement).await?;

        log::info!(
            "Announcement posted to course '{}' by '{}'",
            course.id,
            caller.username
        );
        Ok(())
    }
}
