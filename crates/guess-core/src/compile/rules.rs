//! Per-item question synthesis. Evaluates a fixed rule set against an item's
//! tags and attributes, recording the dependency map each rule implies.

use super::texts;
use crate::model::catalog::{Catalog, Item, Tag};
use crate::model::question::{Expectation, Question, QuestionGroup, QuestionId};
use crate::model::version::trim_patch_version;

/// Distinct first/last name letters across the whole catalog, in catalog
/// order. Needed so every letter question can foreclose all the others.
pub struct LetterSets {
    starts: Vec<char>,
    ends: Vec<char>,
}

impl LetterSets {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut starts = Vec::new();
        let mut ends = Vec::new();
        for item in catalog.items() {
            if let Some(letter) = first_letter(&item.name)
                && !starts.contains(&letter)
            {
                starts.push(letter);
            }
            if let Some(letter) = last_letter(&item.name)
                && !ends.contains(&letter)
            {
                ends.push(letter);
            }
        }
        Self { starts, ends }
    }
}

pub fn first_letter(name: &str) -> Option<char> {
    name.chars().next().map(upper)
}

pub fn last_letter(name: &str) -> Option<char> {
    name.chars().next_back().map(upper)
}

fn upper(letter: char) -> char {
    letter.to_uppercase().next().unwrap_or(letter)
}

fn fixed(text: &texts::FixedText, group: QuestionGroup) -> Question {
    Question::new(QuestionId::new(text.id), text.text, text.statement, group)
}

enum Category {
    Popup,
    EasterEgg,
    Theme,
    Community,
    Editor,
}

/// The single mutually-exclusive taxonomy branch an item belongs to,
/// first-match-wins over its tags.
fn category_of(item: &Item) -> Category {
    if item.has_tag(Tag::Popup) {
        Category::Popup
    } else if item.has_tag(Tag::EasterEgg) {
        Category::EasterEgg
    } else if item.has_tag(Tag::Theme) {
        Category::Theme
    } else if item.has_tag(Tag::Community) {
        Category::Community
    } else {
        Category::Editor
    }
}

pub fn questions_for_item(item: &Item, catalog: &Catalog, letters: &LetterSets) -> Vec<Question> {
    let mut result = Vec::new();

    push_letter_questions(item, letters, &mut result);

    if item.enabled_by_default {
        result.push(fixed(&texts::SETTINGS_ENABLED_DEFAULT, QuestionGroup::Settings));
    }

    push_category_questions(item, &mut result);
    push_group_questions(item, &mut result);
    push_tag_questions(item, &mut result);
    push_settings_questions(item, &mut result);
    push_history_questions(item, catalog, &mut result);

    result
}

fn push_letter_questions(item: &Item, letters: &LetterSets, result: &mut Vec<Question>) {
    if let Some(letter) = first_letter(&item.name) {
        let dependencies = letters
            .starts
            .iter()
            .filter(|&&other| other != letter)
            .map(|&other| (QuestionId::new(texts::start_letter_id(other)), Expectation::No));
        result.push(
            Question::new(
                QuestionId::new(texts::start_letter_id(letter)),
                texts::start_letter_text(letter),
                texts::start_letter_statement(letter),
                QuestionGroup::Name,
            )
            .with_order(1)
            .with_dependencies(dependencies),
        );
    }

    if let Some(letter) = last_letter(&item.name) {
        let dependencies = letters
            .ends
            .iter()
            .filter(|&&other| other != letter)
            .map(|&other| (QuestionId::new(texts::end_letter_id(other)), Expectation::No));
        result.push(
            Question::new(
                QuestionId::new(texts::end_letter_id(letter)),
                texts::end_letter_text(letter),
                texts::end_letter_statement(letter),
                QuestionGroup::Name,
            )
            .with_order(2)
            .with_dependencies(dependencies),
        );
    }
}

fn push_category_questions(item: &Item, result: &mut Vec<Question>) {
    // A secret item keeps its regular category; the easter-egg question is
    // left undetermined instead of foreclosed.
    let easter_egg_expectation = if item.secret {
        Expectation::Unknown
    } else {
        Expectation::No
    };

    match category_of(item) {
        Category::Theme => {
            result.push(
                fixed(&texts::THEMES, QuestionGroup::Categories).with_dependencies([
                    (QuestionId::new(texts::EDITOR_ROOT.id), Expectation::No),
                    (QuestionId::new(texts::WEBSITE_ROOT.id), Expectation::No),
                    (QuestionId::new(texts::POPUP.id), Expectation::No),
                    (QuestionId::new(texts::EASTER_EGG.id), easter_egg_expectation),
                ]),
            );
            let (sub, opposite) = if item.has_tag(Tag::Editor) {
                (&texts::THEMES_EDITOR, &texts::THEMES_WEBSITE)
            } else {
                (&texts::THEMES_WEBSITE, &texts::THEMES_EDITOR)
            };
            result.push(
                fixed(sub, QuestionGroup::Categories).with_dependencies([
                    (QuestionId::new(texts::THEMES.id), Expectation::Yes),
                    (QuestionId::new(opposite.id), Expectation::No),
                ]),
            );
        }
        Category::Editor => {
            result.push(
                fixed(&texts::EDITOR_ROOT, QuestionGroup::Categories).with_dependencies([
                    (QuestionId::new(texts::THEMES.id), Expectation::No),
                    (QuestionId::new(texts::WEBSITE_ROOT.id), Expectation::No),
                    (QuestionId::new(texts::POPUP.id), Expectation::No),
                    (QuestionId::new(texts::EASTER_EGG.id), easter_egg_expectation),
                ]),
            );

            let sub = if item.has_tag(Tag::CodeEditor) {
                &texts::EDITOR_CODE
            } else if item.has_tag(Tag::CostumeEditor) {
                &texts::EDITOR_COSTUMES
            } else if item.has_tag(Tag::ProjectPlayer) {
                &texts::EDITOR_PLAYER
            } else {
                &texts::EDITOR_OTHER
            };
            let siblings = [
                &texts::EDITOR_CODE,
                &texts::EDITOR_COSTUMES,
                &texts::EDITOR_PLAYER,
                &texts::EDITOR_OTHER,
            ]
            .into_iter()
            .filter(|other| other.id != sub.id)
            .map(|other| (QuestionId::new(other.id), Expectation::No));
            result.push(
                fixed(sub, QuestionGroup::Categories)
                    .with_dependency(QuestionId::new(texts::EDITOR_ROOT.id), Expectation::Yes)
                    .with_dependencies(siblings),
            );
        }
        Category::Community => {
            let sub = if item.has_tag(Tag::Profiles) {
                &texts::WEBSITE_PROFILES
            } else if item.has_tag(Tag::ProjectPage) {
                &texts::WEBSITE_PROJECTS
            } else if item.has_tag(Tag::Forums) {
                &texts::WEBSITE_FORUMS
            } else {
                &texts::WEBSITE_OTHER
            };
            let siblings = [
                &texts::WEBSITE_PROFILES,
                &texts::WEBSITE_PROJECTS,
                &texts::WEBSITE_FORUMS,
                &texts::WEBSITE_OTHER,
            ]
            .into_iter()
            .filter(|other| other.id != sub.id)
            .map(|other| (QuestionId::new(other.id), Expectation::No));
            result.push(
                fixed(sub, QuestionGroup::Categories)
                    .with_dependency(QuestionId::new(texts::WEBSITE_ROOT.id), Expectation::Yes)
                    .with_dependencies(siblings),
            );

            result.push(
                fixed(&texts::WEBSITE_ROOT, QuestionGroup::Categories).with_dependencies([
                    (QuestionId::new(texts::THEMES.id), Expectation::No),
                    (QuestionId::new(texts::EDITOR_ROOT.id), Expectation::No),
                    (QuestionId::new(texts::POPUP.id), Expectation::No),
                ]),
            );
        }
        Category::Popup => {
            result.push(
                fixed(&texts::POPUP, QuestionGroup::Categories).with_dependencies([
                    (QuestionId::new(texts::THEMES.id), Expectation::No),
                    (QuestionId::new(texts::EDITOR_ROOT.id), Expectation::No),
                    (QuestionId::new(texts::WEBSITE_ROOT.id), Expectation::No),
                ]),
            );
        }
        Category::EasterEgg => {
            result.push(
                fixed(&texts::EASTER_EGG, QuestionGroup::Categories).with_dependencies([
                    (QuestionId::new(texts::THEMES.id), Expectation::No),
                    (QuestionId::new(texts::POPUP.id), Expectation::No),
                    (QuestionId::new(texts::EDITOR_ROOT.id), Expectation::No),
                    (QuestionId::new(texts::WEBSITE_ROOT.id), Expectation::No),
                ]),
            );
        }
    }

    if item.secret {
        result.push(fixed(&texts::EASTER_EGG, QuestionGroup::Categories));
    }
}

fn push_group_questions(item: &Item, result: &mut Vec<Question>) {
    if item.has_tag(Tag::Recommended) {
        result.push(
            fixed(&texts::TAG_RECOMMENDED, QuestionGroup::Tags).with_dependencies([
                (QuestionId::new(texts::GROUP_FEATURED.id), Expectation::No),
                (QuestionId::new(texts::GROUP_BETA.id), Expectation::No),
                (QuestionId::new(texts::GROUP_OTHERS.id), Expectation::No),
            ]),
        );
    } else if item.has_tag(Tag::Featured) {
        result.push(
            fixed(&texts::GROUP_FEATURED, QuestionGroup::Groups).with_dependencies([
                (QuestionId::new(texts::GROUP_BETA.id), Expectation::No),
                (QuestionId::new(texts::GROUP_FORUMS.id), Expectation::No),
                (QuestionId::new(texts::GROUP_OTHERS.id), Expectation::No),
                (QuestionId::new(texts::TAG_RECOMMENDED.id), Expectation::No),
            ]),
        );
    } else if item.has_tag(Tag::Beta) || item.has_tag(Tag::Danger) {
        result.push(
            fixed(&texts::GROUP_BETA, QuestionGroup::Groups).with_dependencies([
                (QuestionId::new(texts::GROUP_FEATURED.id), Expectation::No),
                (QuestionId::new(texts::GROUP_FORUMS.id), Expectation::No),
                (QuestionId::new(texts::GROUP_OTHERS.id), Expectation::No),
            ]),
        );
    } else if item.has_tag(Tag::Forums) {
        result.push(
            fixed(&texts::GROUP_FORUMS, QuestionGroup::Groups).with_dependencies([
                (QuestionId::new(texts::GROUP_FEATURED.id), Expectation::No),
                (QuestionId::new(texts::GROUP_BETA.id), Expectation::No),
                (QuestionId::new(texts::TAG_FORUMS.id), Expectation::Yes),
                (QuestionId::new(texts::GROUP_OTHERS.id), Expectation::No),
            ]),
        );
    } else {
        result.push(
            fixed(&texts::GROUP_OTHERS, QuestionGroup::Groups).with_dependencies([
                (QuestionId::new(texts::GROUP_FEATURED.id), Expectation::No),
                (QuestionId::new(texts::GROUP_BETA.id), Expectation::No),
                (QuestionId::new(texts::GROUP_FORUMS.id), Expectation::No),
                (QuestionId::new(texts::TAG_FORUMS.id), Expectation::No),
            ]),
        );
    }
}

fn push_tag_questions(item: &Item, result: &mut Vec<Question>) {
    if item.has_tag(Tag::Danger) {
        result.push(
            fixed(&texts::TAG_DANGEROUS, QuestionGroup::Tags)
                .with_dependency(QuestionId::new(texts::GROUP_BETA.id), Expectation::Yes),
        );
    }

    if item.has_tag(Tag::Forums) {
        result.push(
            fixed(&texts::TAG_FORUMS, QuestionGroup::Tags)
                .with_dependency(QuestionId::new(texts::GROUP_OTHERS.id), Expectation::No),
        );
    }

    if item.has_tag(Tag::Beta) {
        result.push(
            fixed(&texts::TAG_BETA, QuestionGroup::Tags)
                .with_dependency(QuestionId::new(texts::GROUP_BETA.id), Expectation::Yes),
        );
    }
}

fn push_settings_questions(item: &Item, result: &mut Vec<Question>) {
    if item.info {
        result.push(fixed(&texts::SETTINGS_INFO, QuestionGroup::Settings));
    }

    if !item.credits.is_empty() {
        result.push(fixed(&texts::SETTINGS_CREDITS, QuestionGroup::Settings));
        for credit in &item.credits {
            result.push(
                Question::new(
                    QuestionId::new(texts::credit_id(&credit.name)),
                    texts::credit_text(&credit.name),
                    texts::credit_statement(&credit.name),
                    QuestionGroup::Settings,
                )
                .with_dependency(QuestionId::new(texts::SETTINGS_CREDITS.id), Expectation::Yes),
            );
        }
    }

    if item.settings {
        result.push(fixed(&texts::SETTINGS_SETTINGS, QuestionGroup::Settings));
    }

    if item.presets {
        result.push(
            fixed(&texts::SETTINGS_PRESETS, QuestionGroup::Settings)
                .with_dependency(QuestionId::new(texts::SETTINGS_SETTINGS.id), Expectation::Yes),
        );
    }

    if item.preview {
        result.push(
            fixed(&texts::SETTINGS_PREVIEW, QuestionGroup::Settings)
                .with_dependency(QuestionId::new(texts::SETTINGS_SETTINGS.id), Expectation::Yes),
        );
    }
}

fn push_history_questions(item: &Item, catalog: &Catalog, result: &mut Vec<Question>) {
    let Some(release) = catalog.trimmed_version() else {
        return;
    };

    let added_this_release = item
        .version_added
        .as_deref()
        .and_then(trim_patch_version)
        .is_some_and(|added| added == release);
    if added_this_release {
        result.push(Question::new(
            QuestionId::new(texts::ADDED_ID),
            texts::added_text(release),
            texts::ADDED_STATEMENT,
            QuestionGroup::History,
        ));

        let featured = item.has_tag(Tag::Recommended) || item.has_tag(Tag::Featured);
        result.push(bucket_question(texts::ADDED_ID, featured, release));
    }

    let updated_this_release = item
        .latest_update
        .as_ref()
        .and_then(|update| trim_patch_version(&update.version))
        .is_some_and(|updated| updated == release);
    if updated_this_release {
        result.push(Question::new(
            QuestionId::new(texts::UPDATED_ID),
            texts::updated_text(release),
            texts::UPDATED_STATEMENT,
            QuestionGroup::History,
        ));

        let new_settings = catalog
            .latest_update()
            .is_some_and(|update| !update.new_settings.is_empty());
        let (tag, opposite) = if new_settings {
            (&texts::UPDATE_TAG_NEW_SETTINGS, &texts::UPDATE_TAG_NEW_FEATURES)
        } else {
            (&texts::UPDATE_TAG_NEW_FEATURES, &texts::UPDATE_TAG_NEW_SETTINGS)
        };
        result.push(
            fixed(tag, QuestionGroup::History).with_dependencies([
                (QuestionId::new(texts::UPDATED_ID), Expectation::Yes),
                (QuestionId::new(opposite.id), Expectation::No),
            ]),
        );

        let featured = catalog.latest_update().is_some_and(|update| update.is_major);
        result.push(bucket_question(texts::UPDATED_ID, featured, release));
    }
}

/// The "Featured vs Other new addons and updates" sub-question shown on the
/// release page, gated on the corresponding added/updated question.
fn bucket_question(prefix: &str, featured: bool, release: &str) -> Question {
    Question::new(
        QuestionId::new(texts::new_bucket_id(prefix, featured)),
        texts::new_bucket_text(featured, release),
        texts::new_bucket_statement(featured),
        QuestionGroup::History,
    )
    .with_dependencies([
        (QuestionId::new(prefix), Expectation::Yes),
        (
            QuestionId::new(texts::new_bucket_id(prefix, !featured)),
            Expectation::No,
        ),
    ])
}
