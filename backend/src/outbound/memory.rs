//! In-memory student store.
//!
//! Mirrors the PostgreSQL adapter's contract: insertion order, store-assigned
//! identifiers and timestamps, and a unique email index. Used by integration
//! tests and the client crate's end-to-end suite.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{StudentPersistenceError, StudentRepository};
use crate::domain::{NewStudent, Student, StudentId};

/// Student store backed by a `Vec` behind a mutex.
#[derive(Clone)]
pub struct InMemoryStudentRepository {
    students: Arc<Mutex<Vec<Student>>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryStudentRepository {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryStudentRepository {
    /// Create an empty store stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            students: Arc::new(Mutex::new(Vec::new())),
            clock,
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().map(|students| students.len()).unwrap_or_default()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Count records holding `email`.
    pub fn count_with_email(&self, email: &str) -> usize {
        self.lock()
            .map(|students| {
                students
                    .iter()
                    .filter(|student| student.email.as_ref() == email)
                    .count()
            })
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Student>>, StudentPersistenceError> {
        self.students
            .lock()
            .map_err(|_| StudentPersistenceError::query("student store lock poisoned"))
    }
}

fn email_taken(students: &[Student], email: &str, except: Option<&StudentId>) -> bool {
    students
        .iter()
        .any(|student| student.email.as_ref() == email && Some(&student.id) != except)
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn list(&self) -> Result<Vec<Student>, StudentPersistenceError> {
        Ok(self.lock()?.clone())
    }

    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, StudentPersistenceError> {
        Ok(self.lock()?.iter().find(|student| &student.id == id).cloned())
    }

    async fn insert(&self, student: &NewStudent) -> Result<Student, StudentPersistenceError> {
        let mut students = self.lock()?;
        if email_taken(&students, student.email.as_ref(), None) {
            return Err(StudentPersistenceError::duplicate_email(
                student.email.as_ref(),
            ));
        }

        let now = self.clock.utc();
        let stored = Student {
            id: StudentId::random(),
            name: student.name.clone(),
            email: student.email.clone(),
            age: student.age,
            course: student.course.clone(),
            enrollment_date: student.enrollment_date,
            created_at: now,
            updated_at: now,
        };
        students.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, student: &Student) -> Result<Option<Student>, StudentPersistenceError> {
        let mut students = self.lock()?;
        if email_taken(&students, student.email.as_ref(), Some(&student.id)) {
            return Err(StudentPersistenceError::duplicate_email(
                student.email.as_ref(),
            ));
        }

        let now = self.clock.utc();
        let Some(slot) = students.iter_mut().find(|stored| stored.id == student.id) else {
            return Ok(None);
        };
        slot.name = student.name.clone();
        slot.email = student.email.clone();
        slot.age = student.age;
        slot.course = student.course.clone();
        slot.enrollment_date = student.enrollment_date;
        slot.updated_at = now;
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: &StudentId) -> Result<Option<Student>, StudentPersistenceError> {
        let mut students = self.lock()?;
        let position = students.iter().position(|student| &student.id == id);
        Ok(position.map(|index| students.remove(index)))
    }
}
