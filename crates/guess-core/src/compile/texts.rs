//! Rendered wording for every compiled question. Logic never keys on these
//! strings; ids in `rules` are the stable handles.

pub struct FixedText {
    pub id: &'static str,
    pub text: &'static str,
    pub statement: &'static str,
}

pub const EASTER_EGG: FixedText = FixedText {
    id: "category:easter-egg",
    text: "is your addon an easter egg addon (shown after typing the Konami code)?",
    statement: "This addon is an easter egg addon!",
};

pub const EDITOR_ROOT: FixedText = FixedText {
    id: "category:editor",
    text: "is your addon listed under Editor Features?",
    statement: "This addon is listed under Editor Features!",
};

pub const EDITOR_CODE: FixedText = FixedText {
    id: "category:editor/code",
    text: "is your addon listed under Editor Features -> Code Editor?",
    statement: "This addon is listed under Editor Features -> Code Editor!",
};

pub const EDITOR_COSTUMES: FixedText = FixedText {
    id: "category:editor/costumes",
    text: "is your addon listed under Editor Features -> Costume Editor?",
    statement: "This addon is listed under Editor Features -> Costume Editor!",
};

pub const EDITOR_PLAYER: FixedText = FixedText {
    id: "category:editor/player",
    text: "is your addon listed under Editor Features -> Project Player?",
    statement: "This addon is listed under Editor Features -> Project Player!",
};

pub const EDITOR_OTHER: FixedText = FixedText {
    id: "category:editor/other",
    text: "is your addon listed under Editor Features -> Others?",
    statement: "This addon is listed under Editor Features -> Others!",
};

pub const POPUP: FixedText = FixedText {
    id: "category:popup",
    text: "is your addon listed under Extension Popup Features?",
    statement: "This addon is listed under Extension Popup Features!",
};

pub const THEMES: FixedText = FixedText {
    id: "category:themes",
    text: "is your addon listed under Themes?",
    statement: "This addon is listed under Themes!",
};

pub const THEMES_EDITOR: FixedText = FixedText {
    id: "category:themes/editor",
    text: "is your addon listed under Themes -> Editor Themes?",
    statement: "This addon is listed under Themes -> Editor Themes!",
};

pub const THEMES_WEBSITE: FixedText = FixedText {
    id: "category:themes/website",
    text: "is your addon listed under Themes -> Website Themes?",
    statement: "This addon is listed under Themes -> Website Themes!",
};

pub const WEBSITE_ROOT: FixedText = FixedText {
    id: "category:website",
    text: "is your addon listed under Website Features?",
    statement: "This addon is listed under Website Features!",
};

pub const WEBSITE_PROFILES: FixedText = FixedText {
    id: "category:website/profiles",
    text: "is your addon listed under Website Features -> Profiles?",
    statement: "This addon is listed under Website Features -> Profiles!",
};

pub const WEBSITE_PROJECTS: FixedText = FixedText {
    id: "category:website/projects",
    text: "is your addon listed under Website Features -> Project Pages?",
    statement: "This addon is listed under Website Features -> Project Pages!",
};

pub const WEBSITE_FORUMS: FixedText = FixedText {
    id: "category:website/forums",
    text: "is your addon listed under Website Features -> Forums?",
    statement: "This addon is listed under Website Features -> Forums!",
};

pub const WEBSITE_OTHER: FixedText = FixedText {
    id: "category:website/other",
    text: "is your addon listed under Website Features -> Others?",
    statement: "This addon is listed under Website Features -> Others!",
};

pub const GROUP_FEATURED: FixedText = FixedText {
    id: "group:featured",
    text: "is your addon found under Featured when disabled?",
    statement: "This addon is found under Featured when disabled!",
};

pub const GROUP_BETA: FixedText = FixedText {
    id: "group:beta",
    text: "is your addon found under Beta when disabled?",
    statement: "This addon is found under Beta when disabled!",
};

pub const GROUP_FORUMS: FixedText = FixedText {
    id: "group:forums",
    text: "is your addon found under Forums when disabled?",
    statement: "This addon is found under Forums when disabled!",
};

pub const GROUP_OTHERS: FixedText = FixedText {
    id: "group:others",
    text: "is your addon found under Others when disabled?",
    statement: "This addon is found under Others when disabled!",
};

pub const TAG_RECOMMENDED: FixedText = FixedText {
    id: "tag:recommended",
    text: "does your addon have the Recommended tag?",
    statement: "This addon has the Recommended tag!",
};

pub const TAG_BETA: FixedText = FixedText {
    id: "tag:beta",
    text: "does your addon have the Beta tag?",
    statement: "This addon has the Beta tag!",
};

pub const TAG_DANGEROUS: FixedText = FixedText {
    id: "tag:dangerous",
    text: "does your addon have the Dangerous tag?",
    statement: "This addon has the Dangerous tag!",
};

pub const TAG_FORUMS: FixedText = FixedText {
    id: "tag:forums",
    text: "does your addon have the Forums tag?",
    statement: "This addon has the Forums tag!",
};

pub const SETTINGS_ENABLED_DEFAULT: FixedText = FixedText {
    id: "settings:enabled-default",
    text: "is your addon enabled by default?",
    statement: "This addon is enabled by default!",
};

pub const SETTINGS_INFO: FixedText = FixedText {
    id: "settings:info",
    text: "does your addon have any warnings and/or notices on the settings page?",
    statement: "This addon has warnings and/or notices on the settings page!",
};

pub const SETTINGS_CREDITS: FixedText = FixedText {
    id: "settings:credits",
    text: "does your addon have credits listed on the settings page?",
    statement: "This addon has credits listed on the settings page!",
};

pub const SETTINGS_SETTINGS: FixedText = FixedText {
    id: "settings:settings",
    text: "does your addon have any settings?",
    statement: "This addon has settings!",
};

pub const SETTINGS_PRESETS: FixedText = FixedText {
    id: "settings:presets",
    text: "does your addon have any presets for its settings?",
    statement: "This addon has presets for its settings!",
};

pub const SETTINGS_PREVIEW: FixedText = FixedText {
    id: "settings:preview",
    text: "does your addon have an interactive preview for its settings?",
    statement: "This addon has an interactive preview for its settings!",
};

pub const UPDATE_TAG_NEW_SETTINGS: FixedText = FixedText {
    id: "history:update-tag/new-settings",
    text: "does your addon have the New settings tag?",
    statement: "This addon has the New settings tag!",
};

pub const UPDATE_TAG_NEW_FEATURES: FixedText = FixedText {
    id: "history:update-tag/new-features",
    text: "does your addon have the New features tag?",
    statement: "This addon has the New features tag!",
};

pub fn start_letter_id(letter: char) -> String {
    format!("name-start:{letter}")
}

pub fn end_letter_id(letter: char) -> String {
    format!("name-end:{letter}")
}

pub fn start_letter_text(letter: char) -> String {
    format!("does your addon's name start with {letter}?")
}

pub fn start_letter_statement(letter: char) -> String {
    format!("This addon's name starts with {letter}!")
}

pub fn end_letter_text(letter: char) -> String {
    format!("does your addon's name end with {letter}?")
}

pub fn end_letter_statement(letter: char) -> String {
    format!("This addon's name ends with {letter}!")
}

pub fn credit_id(name: &str) -> String {
    format!("credit:{name}")
}

pub fn credit_text(name: &str) -> String {
    format!("did {name} contribute to your addon?")
}

pub fn credit_statement(name: &str) -> String {
    format!("{name} contributed to this addon!")
}

pub fn added_text(version: &str) -> String {
    format!("was your addon added in the latest version ({version})?")
}

pub const ADDED_ID: &str = "history:new";
pub const ADDED_STATEMENT: &str = "This addon was added in the latest version!";

pub fn updated_text(version: &str) -> String {
    format!(
        "was your addon updated (not including completely new addons) in the latest version ({version})?"
    )
}

pub const UPDATED_ID: &str = "history:updated";
pub const UPDATED_STATEMENT: &str = "This addon was updated in the latest version!";

pub fn new_bucket_id(prefix: &str, featured: bool) -> String {
    format!("{prefix}/{}", if featured { "featured" } else { "other" })
}

pub fn new_bucket_text(featured: bool, version: &str) -> String {
    format!(
        "is your addon found under {} new addons and updates as of version {version}?",
        if featured { "Featured" } else { "Other" }
    )
}

pub fn new_bucket_statement(featured: bool) -> String {
    format!(
        "This addon is currently found under {} new addons and updates!",
        if featured { "Featured" } else { "Other" }
    )
}
