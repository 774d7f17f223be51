pub mod login;
pub mod logout;
pub mod profile;
pub mod register;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::admins::entities::Admin;
use crate::models::auth::PrincipalKind;
use crate::models::auth::requests::{AdminLoginRequest, FacultyLoginRequest, StudentLoginRequest};
use crate::models::faculties::entities::Faculty;
use crate::models::students::entities::Student;
use crate::models::students::requests::{ChangePasswordRequest, RegisterStudentRequest};
use crate::storage::Storage;

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 管理员登录
    pub async fn admin_login(
        &self,
        request: &HttpRequest,
        body: AdminLoginRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_admin_login(self, request, body).await
    }

    // 教师登录
    pub async fn faculty_login(
        &self,
        request: &HttpRequest,
        body: FacultyLoginRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_faculty_login(self, request, body).await
    }

    // 学生登录
    pub async fn student_login(
        &self,
        request: &HttpRequest,
        body: StudentLoginRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_student_login(self, request, body).await
    }

    // 学生注册
    pub async fn student_register(
        &self,
        request: &HttpRequest,
        body: RegisterStudentRequest,
    ) -> ActixResult<HttpResponse> {
        register::handle_register(self, request, body).await
    }

    // 注销（只清除该角色的会话）
    pub async fn logout(&self, role: PrincipalKind) -> ActixResult<HttpResponse> {
        Ok(logout::handle_logout(role))
    }

    // 当前管理员
    pub async fn admin_me(&self, admin: Admin) -> ActixResult<HttpResponse> {
        Ok(profile::handle_me(PrincipalKind::Admin, admin))
    }

    // 当前教师
    pub async fn faculty_me(&self, faculty: Faculty) -> ActixResult<HttpResponse> {
        Ok(profile::handle_me(PrincipalKind::Faculty, faculty))
    }

    // 当前学生
    pub async fn student_me(&self, student: Student) -> ActixResult<HttpResponse> {
        Ok(profile::handle_me(PrincipalKind::Student, student))
    }

    // 学生修改密码
    pub async fn student_change_password(
        &self,
        request: &HttpRequest,
        student: Student,
        body: ChangePasswordRequest,
    ) -> ActixResult<HttpResponse> {
        profile::handle_change_password(self, request, student, body).await
    }
}
