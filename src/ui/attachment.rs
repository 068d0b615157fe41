use crate::common::PendingAttachment;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AttachmentState {
    #[default]
    Empty,
    Selected(PendingAttachment),
    Uploading(PendingAttachment),
}

/// Single-slot holder for the file the user wants to share in the chat.
///
/// `Empty -> Selected -> Uploading -> Empty` on success, back to `Selected`
/// on failure. Nothing but the upload outcome leaves `Uploading`.
#[derive(Debug, Default)]
pub struct AttachmentControl {
    state: AttachmentState,
}

impl AttachmentControl {
    pub fn state(&self) -> &AttachmentState {
        &self.state
    }

    pub fn pending(&self) -> Option<&PendingAttachment> {
        match &self.state {
            AttachmentState::Empty => None,
            AttachmentState::Selected(file) | AttachmentState::Uploading(file) => Some(file),
        }
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.state, AttachmentState::Uploading(_))
    }

    /// Replaces any previously selected file. Ignored mid-upload.
    pub fn select(&mut self, attachment: PendingAttachment) -> bool {
        if self.is_uploading() {
            return false;
        }
        self.state = AttachmentState::Selected(attachment);
        true
    }

    pub fn remove(&mut self) -> bool {
        if !matches!(self.state, AttachmentState::Selected(_)) {
            return false;
        }
        self.state = AttachmentState::Empty;
        true
    }

    /// Moves the selected file into `Uploading` and hands it out for the
    /// object-store call.
    pub fn confirm_upload(&mut self) -> Option<PendingAttachment> {
        match std::mem::take(&mut self.state) {
            AttachmentState::Selected(file) => {
                self.state = AttachmentState::Uploading(file.clone());
                Some(file)
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    pub fn upload_succeeded(&mut self) -> Option<PendingAttachment> {
        match std::mem::take(&mut self.state) {
            AttachmentState::Uploading(file) => Some(file),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Returns to `Selected` with the same file so the user can retry.
    pub fn upload_failed(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            AttachmentState::Uploading(file) => {
                self.state = AttachmentState::Selected(file);
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }
}
