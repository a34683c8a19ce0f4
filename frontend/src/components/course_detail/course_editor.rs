//! Course editor state
//!
//! Edited fields are kept next to the saved course; "unsaved changes" is
//! always derived from the two, never stored.

use studyapp_shared::{Course, CourseDraft, duration_label, parse_duration_hours};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// Creation was abandoned; leave the page.
    LeaveToHome,
    /// Edits were dropped; show the saved course again.
    BackToView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveBlocked {
    EmptyTitle,
    NoChanges,
}

impl SaveBlocked {
    pub fn message(&self) -> &'static str {
        match self {
            SaveBlocked::EmptyTitle => "Tiêu đề khóa học không được để trống khi tạo mới.",
            SaveBlocked::NoChanges => "Không có thay đổi nào để lưu.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseEditor {
    /// `None` while creating.
    saved: Option<Course>,
    editing: bool,
    pub title: String,
    pub description: String,
    /// Free text such as `"~ 12 giờ"`; hours are read from its first number.
    pub duration: String,
}

impl CourseEditor {
    /// Creation form, opened straight in edit mode.
    pub fn for_new() -> Self {
        Self {
            saved: None,
            editing: true,
            title: String::new(),
            description: String::new(),
            duration: duration_label(0),
        }
    }

    pub fn for_course(course: Course) -> Self {
        let mut editor = Self {
            saved: Some(course),
            editing: false,
            title: String::new(),
            description: String::new(),
            duration: String::new(),
        };
        editor.reset_fields();
        editor
    }

    fn reset_fields(&mut self) {
        match &self.saved {
            Some(course) => {
                self.title = course.title.clone();
                self.description = course.description.clone();
                self.duration = course.estimated_duration_label();
            }
            None => {
                self.title.clear();
                self.description.clear();
                self.duration = duration_label(0);
            }
        }
    }

    pub fn is_new(&self) -> bool {
        self.saved.is_none()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn course(&self) -> Option<&Course> {
        self.saved.as_ref()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        match &self.saved {
            None => {
                !self.title.trim().is_empty()
                    || !self.description.is_empty()
                    || self.duration != duration_label(0)
            }
            Some(course) => {
                self.title != course.title
                    || self.description != course.description
                    || self.duration != course.estimated_duration_label()
            }
        }
    }

    pub fn can_save(&self) -> bool {
        self.check_save().is_ok()
    }

    fn check_save(&self) -> Result<(), SaveBlocked> {
        if self.is_new() {
            if self.title.trim().is_empty() {
                return Err(SaveBlocked::EmptyTitle);
            }
        } else if !self.has_unsaved_changes() {
            return Err(SaveBlocked::NoChanges);
        }
        Ok(())
    }

    /// Request body for the current fields, trimmed.
    pub fn draft(&self) -> Result<CourseDraft, SaveBlocked> {
        self.check_save()?;
        Ok(CourseDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            estimated_total_duration_hours: parse_duration_hours(&self.duration),
        })
    }

    /// Enters edit mode from the saved values.
    pub fn begin_edit(&mut self) {
        self.reset_fields();
        self.editing = true;
    }

    pub fn cancel(&mut self) -> CancelOutcome {
        if self.is_new() {
            return CancelOutcome::LeaveToHome;
        }
        self.reset_fields();
        self.editing = false;
        CancelOutcome::BackToView
    }

    /// Adopts the course the backend returned after a save.
    pub fn saved(&mut self, course: Course) {
        self.saved = Some(course);
        self.editing = false;
        self.reset_fields();
    }

    /// Leaving now would drop edits.
    pub fn leave_needs_confirmation(&self) -> bool {
        self.editing && self.has_unsaved_changes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course() -> Course {
        Course {
            id: "c1".to_string(),
            title: "Rust cơ bản".to_string(),
            description: "Ownership".to_string(),
            estimated_hours: 12,
            total_study_time: "00:00:00".to_string(),
            progress: 40,
            color: "#10b981".to_string(),
            icon: "📘".to_string(),
        }
    }

    #[test]
    fn test_new_course_needs_title() {
        let mut editor = CourseEditor::for_new();
        assert!(editor.is_editing());
        assert!(!editor.has_unsaved_changes());
        assert!(!editor.can_save());

        editor.description = "mô tả".to_string();
        assert!(editor.has_unsaved_changes());
        assert_eq!(editor.draft(), Err(SaveBlocked::EmptyTitle));

        editor.title = "  Web  ".to_string();
        editor.duration = "~ 30 giờ".to_string();
        let draft = editor.draft().unwrap();
        assert_eq!(draft.title, "Web");
        assert_eq!(draft.estimated_total_duration_hours, 30);
    }

    #[test]
    fn test_existing_course_tracks_changes() {
        let mut editor = CourseEditor::for_course(course());
        assert!(!editor.is_editing());
        assert_eq!(editor.duration, "~ 12 giờ");

        editor.begin_edit();
        assert!(!editor.can_save());
        assert_eq!(editor.draft(), Err(SaveBlocked::NoChanges));

        editor.title.push('!');
        assert!(editor.can_save());

        // Back to the saved value: nothing to save again.
        editor.title.pop();
        assert!(!editor.has_unsaved_changes());

        editor.duration = "khoảng 15".to_string();
        assert_eq!(editor.draft().unwrap().estimated_total_duration_hours, 15);
    }

    #[test]
    fn test_duration_without_digits_is_zero() {
        let mut editor = CourseEditor::for_course(course());
        editor.begin_edit();
        editor.duration = "chưa rõ".to_string();
        assert_eq!(editor.draft().unwrap().estimated_total_duration_hours, 0);
    }

    #[test]
    fn test_cancel() {
        let mut editor = CourseEditor::for_course(course());
        editor.begin_edit();
        editor.description = "khác".to_string();
        assert!(editor.leave_needs_confirmation());

        assert_eq!(editor.cancel(), CancelOutcome::BackToView);
        assert_eq!(editor.description, "Ownership");
        assert!(!editor.is_editing());
        assert!(!editor.leave_needs_confirmation());

        assert_eq!(CourseEditor::for_new().cancel(), CancelOutcome::LeaveToHome);
    }

    #[test]
    fn test_saved_adopts_backend_course() {
        let mut editor = CourseEditor::for_course(course());
        editor.begin_edit();
        editor.title = "Rust nâng cao".to_string();

        let mut updated = course();
        updated.title = "Rust nâng cao".to_string();
        updated.estimated_hours = 20;
        editor.saved(updated);

        assert!(!editor.is_editing());
        assert_eq!(editor.duration, "~ 20 giờ");
        assert!(!editor.has_unsaved_changes());
        assert_eq!(editor.course().map(|c| c.estimated_hours), Some(20));
    }
}
