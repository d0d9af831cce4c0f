//! Built-in response library used when no template document is available.

use super::ResponseTemplates;
use std::collections::BTreeMap;

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

/// The default template library. Crisis entries mention the `988` line.
pub fn default_templates() -> ResponseTemplates {
    let mut emotions = BTreeMap::new();
    emotions.insert(
        "joy".to_owned(),
        list(&[
            "I'm happy to hear you're feeling good! What's bringing you joy?",
            "That's wonderful! Would you like to share more about these positive feelings?",
        ]),
    );
    emotions.insert(
        "sadness".to_owned(),
        list(&[
            "I hear that you're feeling sad. Would you like to talk about it?",
            "It's okay to feel sad sometimes. What do you think triggered these feelings?",
        ]),
    );
    emotions.insert(
        "anger".to_owned(),
        list(&[
            "I can sense that you're angry. Would you like to explore what's causing this?",
            "Your anger is valid. Let's talk about what's frustrating you.",
        ]),
    );
    emotions.insert(
        "fear".to_owned(),
        list(&[
            "It sounds like you're feeling anxious. What's making you worried?",
            "I understand that you're scared. Would you like to talk about your fears?",
        ]),
    );
    emotions.insert(
        "surprise".to_owned(),
        list(&[
            "That does sound surprising! How are you processing this?",
            "Unexpected things can be overwhelming. Would you like to talk about it?",
        ]),
    );
    emotions.insert(
        "love".to_owned(),
        list(&[
            "It's beautiful to hear about these feelings of love and connection.",
            "Those are wonderful feelings to have. Would you like to share more?",
        ]),
    );

    let mut coping_suggestions = BTreeMap::new();
    coping_suggestions.insert(
        "sadness".to_owned(),
        list(&[
            "Would you like to try some deep breathing exercises?",
            "Sometimes going for a walk can help clear your mind.",
            "Would you like to talk about things that usually cheer you up?",
        ]),
    );
    coping_suggestions.insert(
        "anger".to_owned(),
        list(&[
            "Let's try counting to ten together.",
            "Would you like to try some progressive muscle relaxation?",
            "Sometimes writing down our feelings can help process them.",
        ]),
    );
    coping_suggestions.insert(
        "fear".to_owned(),
        list(&[
            "Let's focus on grounding exercises. Can you name 5 things you can see?",
            "Would you like to try some calming breathing exercises?",
            "Remember that this feeling will pass. You're safe right now.",
        ]),
    );

    ResponseTemplates {
        emotions,
        greetings: list(&[
            "Hello! How are you feeling today?",
            "Hi there! Would you like to talk about how you're doing?",
            "Welcome back! How has your day been?",
        ]),
        crisis: list(&[
            "I hear that you're going through a really tough time. Please know that help is \
             available. The Crisis Helpline (988) has caring people ready to listen 24/7.",
            "I understand you're in pain. Would you like to talk to a professional? The Crisis \
             Helpline (988) is available anytime.",
        ]),
        coping_suggestions,
    }
}
