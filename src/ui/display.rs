use crate::collaborators::DisplayAdapter;
use crate::round::Prompt;
use crate::validation::sanitize_number_input;

/// Answer fields being typed during the input phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerForm {
    fields: Vec<String>,
    focus: usize,
}

impl AnswerForm {
    pub fn reset(&mut self, fields: usize) {
        self.fields = vec![String::new(); fields];
        self.focus = 0;
    }

    pub fn clear(&mut self) {
        self.fields.clear();
        self.focus = 0;
    }

    pub fn is_open(&self) -> bool {
        !self.fields.is_empty()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Type one character into the focused field; anything the number
    /// filter rejects is dropped.
    pub fn push(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.push(c);
            *field = sanitize_number_input(field);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.pop();
        }
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn values(&self) -> Vec<String> {
        self.fields.clone()
    }
}

/// Terminal-side state of the display collaborator. Rendering reads it
/// on the next frame.
#[derive(Debug, Clone, Default)]
pub struct TerminalDisplay {
    pub rods: usize,
    pub visible: Option<u32>,
    pub prompt: Option<Prompt>,
    pub prompt_text: String,
    pub form: AnswerForm,
    pub destroyed: bool,
}

impl TerminalDisplay {
    pub fn new(rods: usize) -> Self {
        Self {
            rods: rods.max(1),
            ..Self::default()
        }
    }
}

impl DisplayAdapter for TerminalDisplay {
    fn show(&mut self, value: u32) {
        self.visible = Some(value);
    }

    fn hide(&mut self) {
        self.visible = None;
    }

    fn prompt(&mut self, prompt: &Prompt, text: &str) {
        match prompt {
            Prompt::Answer { fields } => self.form.reset(*fields),
            // the answers stay on screen next to the feedback
            Prompt::Correct | Prompt::Incorrect { .. } => {}
            Prompt::Prepare | Prompt::Watch => self.form.clear(),
        }
        self.prompt = Some(prompt.clone());
        self.prompt_text = text.to_string();
    }

    fn destroy(&mut self) {
        self.visible = None;
        self.prompt = None;
        self.prompt_text.clear();
        self.form.clear();
        self.destroyed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_filters_input() {
        let mut form = AnswerForm::default();
        form.reset(1);
        for c in "1a2-3".chars() {
            form.push(c);
        }
        assert_eq!(form.values(), vec!["123"]);

        form.reset(1);
        for c in "-42".chars() {
            form.push(c);
        }
        assert_eq!(form.values(), vec!["-42"]);
        form.backspace();
        assert_eq!(form.values(), vec!["-4"]);
    }

    #[test]
    fn form_focus_wraps() {
        let mut form = AnswerForm::default();
        form.reset(3);
        form.push('1');
        form.next_field();
        form.push('2');
        form.next_field();
        form.next_field();
        assert_eq!(form.focus(), 0);
        form.prev_field();
        assert_eq!(form.focus(), 2);
        assert_eq!(form.values(), vec!["1", "2", ""]);
    }

    #[test]
    fn closed_form_ignores_typing() {
        let mut form = AnswerForm::default();
        form.push('1');
        form.next_field();
        assert!(!form.is_open());
        assert!(form.values().is_empty());
    }

    #[test]
    fn answer_prompt_opens_form_and_destroy_clears() {
        let mut display = TerminalDisplay::new(3);
        display.show(123);
        assert_eq!(display.visible, Some(123));
        display.hide();
        display.prompt(&Prompt::Answer { fields: 2 }, "Enter all 2 numbers in order");
        assert_eq!(display.form.fields().len(), 2);

        display.destroy();
        assert!(display.destroyed);
        assert!(!display.form.is_open());
        assert_eq!(display.prompt, None);
    }
}
