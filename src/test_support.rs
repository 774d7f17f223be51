//! 测试辅助：内存 SQLite 存储（走真实迁移）与常用数据构造

use std::net::SocketAddr;
use std::sync::Arc;

use crate::blob::MemoryBlobStore;
use crate::models::admins::{entities::Admin, requests::CreateAdminRequest};
use crate::models::auth::entities::Gender;
use crate::models::faculties::{entities::Faculty, requests::NewFaculty};
use crate::models::problems::{entities::Problem, requests::NewProblem};
use crate::models::students::{entities::Student, requests::NewStudent};
use crate::storage::Storage;
use crate::storage::sea_orm_storage::SeaOrmStorage;
use crate::utils::password::hash_password;

pub const PASSWORD: &str = "Passw0rd!";

pub async fn storage() -> Arc<dyn Storage> {
    Arc::new(
        SeaOrmStorage::connect("sqlite::memory:", 1)
            .await
            .expect("in-memory storage"),
    )
}

pub fn blobs() -> Arc<MemoryBlobStore> {
    Arc::new(MemoryBlobStore::new())
}

/// 每个 HTTP 测试使用独立的客户端地址，避免共享的登录限流计数互相影响
pub fn peer(n: u8) -> SocketAddr {
    SocketAddr::from(([10, 0, 0, n], 40000))
}

pub async fn seed_admin(storage: &dyn Storage, username: &str) -> Admin {
    storage
        .create_admin(CreateAdminRequest {
            username: username.to_string(),
            password: hash_password(PASSWORD).unwrap(),
            full_name: Some("Portal Admin".to_string()),
            is_staff: true,
        })
        .await
        .unwrap()
}

pub async fn seed_faculty(storage: &dyn Storage, faculty_code: &str, username: &str) -> Faculty {
    storage
        .create_faculty(NewFaculty {
            username: username.to_string(),
            password_hash: hash_password(PASSWORD).unwrap(),
            faculty_code: faculty_code.to_string(),
            gender: Gender::Female,
            department: "Computer Science".to_string(),
        })
        .await
        .unwrap()
}

pub async fn seed_student(storage: &dyn Storage, student_code: &str) -> Student {
    storage
        .create_student(NewStudent {
            full_name: format!("Student {student_code}"),
            student_code: student_code.to_string(),
            password_hash: hash_password(PASSWORD).unwrap(),
            gender: Gender::Male,
            year: 2,
            semester: 3,
            department: "Computer Science".to_string(),
        })
        .await
        .unwrap()
}

pub async fn seed_problem(storage: &dyn Storage, title: &str, total_marks: i32) -> Problem {
    storage
        .create_problem(NewProblem {
            title: title.to_string(),
            description: format!("Solve {title}"),
            total_marks,
            created_by: None,
        })
        .await
        .unwrap()
}
