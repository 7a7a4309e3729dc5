pub fn chat(message: &str) -> String {
    format!(
        "You are a patient study assistant. Answer clearly and accurately, \
         and keep the reply focused on the question.\n\nStudent: {message}"
    )
}

pub fn flashcards(topic: &str, count: u32) -> String {
    format!(
        "Create {count} study flashcards about \"{topic}\". Reply with only a JSON array, \
         no prose, where each element is an object with string fields \"question\" and \
         \"answer\"."
    )
}

pub fn quiz(topic: &str, question_count: u32) -> String {
    format!(
        "Write a {question_count}-question multiple choice quiz about \"{topic}\". Reply with \
         only a JSON array, no prose. Each element must be an object with: \"question\" \
         (string), \"options\" (array of exactly 4 strings), \"correctAnswerIndex\" \
         (integer 0-3) and \"explanation\" (string)."
    )
}

pub fn summary(text: &str) -> String {
    format!(
        "Summarize the following text for a student revising for an exam. Keep the key \
         ideas and definitions and drop the rest.\n\n{text}"
    )
}
