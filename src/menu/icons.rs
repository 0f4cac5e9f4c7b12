//! Symbolic menu icon names.
//!
//! Config entries name icons symbolically (`"HomeIcon"`). Each known name maps
//! to a bitmap file stem looked up in the icon directory at realization time.
//! Unknown names resolve to no icon.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A resolvable menu icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeIcon {
    pub name: &'static str,
    pub file_stem: &'static str,
}

impl ThemeIcon {
    /// Bitmap location inside `icon_dir`.
    pub fn path_in(&self, icon_dir: &Path) -> PathBuf {
        icon_dir.join(format!("{}.png", self.file_stem))
    }
}

const THEME_ICONS: &[(&str, &str)] = &[
    ("AccountIcon", "account"),
    ("BrokenImageIcon", "broken_image"),
    ("CancelIcon", "cancel"),
    ("CheckButtonIcon", "check_button"),
    ("CheckButtonCheckedIcon", "check_button_checked"),
    ("ColorAchromaticIcon", "color_achromatic"),
    ("ColorChromaticIcon", "color_chromatic"),
    ("ColorPaletteIcon", "color_palette"),
    ("ComputerIcon", "computer"),
    ("ConfirmIcon", "confirm"),
    ("ContentAddIcon", "content_add"),
    ("ContentClearIcon", "content_clear"),
    ("ContentCopyIcon", "content_copy"),
    ("ContentCutIcon", "content_cut"),
    ("ContentPasteIcon", "content_paste"),
    ("ContentRedoIcon", "content_redo"),
    ("ContentRemoveIcon", "content_remove"),
    ("ContentUndoIcon", "content_undo"),
    ("DeleteIcon", "delete"),
    ("DocumentCreateIcon", "document_create"),
    ("DocumentIcon", "document"),
    ("DocumentPrintIcon", "document_print"),
    ("DocumentSaveIcon", "document_save"),
    ("DownloadIcon", "download"),
    ("ErrorIcon", "error"),
    ("FileApplicationIcon", "file_application"),
    ("FileAudioIcon", "file_audio"),
    ("FileIcon", "file"),
    ("FileImageIcon", "file_image"),
    ("FileTextIcon", "file_text"),
    ("FileVideoIcon", "file_video"),
    ("FolderIcon", "folder"),
    ("FolderNewIcon", "folder_new"),
    ("FolderOpenIcon", "folder_open"),
    ("GridIcon", "grid"),
    ("HelpIcon", "help"),
    ("HistoryIcon", "history"),
    ("HomeIcon", "home"),
    ("InfoIcon", "info"),
    ("ListIcon", "list"),
    ("LoginIcon", "login"),
    ("LogoutIcon", "logout"),
    ("MailAttachmentIcon", "mail_attachment"),
    ("MailComposeIcon", "mail_compose"),
    ("MailForwardIcon", "mail_forward"),
    ("MailReplyAllIcon", "mail_reply_all"),
    ("MailReplyIcon", "mail_reply"),
    ("MailSendIcon", "mail_send"),
    ("MediaFastForwardIcon", "media_fast_forward"),
    ("MediaFastRewindIcon", "media_fast_rewind"),
    ("MediaMusicIcon", "media_music"),
    ("MediaPauseIcon", "media_pause"),
    ("MediaPhotoIcon", "media_photo"),
    ("MediaPlayIcon", "media_play"),
    ("MediaRecordIcon", "media_record"),
    ("MediaReplayIcon", "media_replay"),
    ("MediaSkipNextIcon", "media_skip_next"),
    ("MediaSkipPreviousIcon", "media_skip_previous"),
    ("MediaStopIcon", "media_stop"),
    ("MediaVideoIcon", "media_video"),
    ("MenuDropDownIcon", "menu_drop_down"),
    ("MenuDropUpIcon", "menu_drop_up"),
    ("MenuExpandIcon", "menu_expand"),
    ("MenuIcon", "menu"),
    ("MoreHorizontalIcon", "more_horizontal"),
    ("MoreVerticalIcon", "more_vertical"),
    ("MoveDownIcon", "move_down"),
    ("MoveUpIcon", "move_up"),
    ("NavigateBackIcon", "navigate_back"),
    ("NavigateNextIcon", "navigate_next"),
    ("QuestionIcon", "question"),
    ("RadioButtonCheckedIcon", "radio_button_checked"),
    ("RadioButtonIcon", "radio_button"),
    ("SearchReplaceIcon", "search_replace"),
    ("SearchIcon", "search"),
    ("SettingsIcon", "settings"),
    ("StorageIcon", "storage"),
    ("UploadIcon", "upload"),
    ("ViewFullScreenIcon", "view_full_screen"),
    ("ViewRefreshIcon", "view_refresh"),
    ("ViewRestoreIcon", "view_restore"),
    ("VisibilityOffIcon", "visibility_off"),
    ("VisibilityIcon", "visibility"),
    ("VolumeDownIcon", "volume_down"),
    ("VolumeMuteIcon", "volume_mute"),
    ("VolumeUpIcon", "volume_up"),
    ("WarningIcon", "warning"),
    ("ZoomFitIcon", "zoom_fit"),
    ("ZoomInIcon", "zoom_in"),
    ("ZoomOutIcon", "zoom_out"),
];

static ICON_TABLE: Lazy<HashMap<&'static str, ThemeIcon>> = Lazy::new(|| {
    THEME_ICONS
        .iter()
        .map(|&(name, file_stem)| (name, ThemeIcon { name, file_stem }))
        .collect()
});

/// Resolve a symbolic icon name.
pub fn lookup(name: &str) -> Option<&'static ThemeIcon> {
    ICON_TABLE.get(name)
}
