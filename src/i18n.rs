//! Dictionary-backed localisation for ua, en, ru and es.
//!
//! Lookup falls through the current language, then ua, en, ru, es, and
//! finally returns the key itself.

use serde::{Deserialize, Serialize};

use crate::collaborators::Localizer;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    #[default]
    Ua,
    En,
    Ru,
    Es,
}

const FALLBACK_ORDER: [Language; 4] = Language::ALL;

type Entries = &'static [(&'static str, &'static str)];

const UA: Entries = &[
    ("language", "Українська"),
    ("game.prepare", "Приготуйтесь..."),
    ("game.watch", "Запам'ятайте число!"),
    ("game.answerPrompt", "Яке число ви побачили?"),
    ("game.seriesAnswerPrompt", "Введіть усі {count} чисел по черзі"),
    ("game.correct", "Правильно! 🎉"),
    ("game.incorrect", "Неправильно"),
    ("game.correctWas", "Правильна відповідь:"),
    ("game.progress", "Приклад {current} з {total}"),
    ("game.correctCount", "Правильно"),
    ("game.incorrectCount", "Помилок"),
    ("game.answerHint", "Enter відповісти · Tab наступне поле · Esc вийти"),
    ("game.failureHint", "a показати ще раз · Enter далі · n пропустити"),
    ("game.successHint", "Enter далі"),
    ("results.title", "Результати тренування"),
    ("results.accuracy", "Точність"),
    ("results.correctAnswers", "Правильних відповідей"),
    ("results.incorrectAnswers", "Помилок"),
    ("results.duration", "Час тренування"),
    ("results.durationFormat", "{seconds} сек"),
    ("results.excellent", "Відмінно! 🌟"),
    ("results.good", "Добре! 👍"),
    ("results.needPractice", "Потрібно більше практики 💪"),
    ("results.hint", "r нове тренування · s налаштування · q вийти"),
    ("errors.emptyAnswer", "Будь ласка, введіть число"),
    ("errors.invalidAnswer", "Введіть коректне число"),
    ("errors.generic", "Сталася помилка"),
    ("settings.title", "Налаштування тренування"),
    ("settings.description", "Оберіть параметри для тренування розпізнавання чисел"),
    ("settings.digitsLabel", "Розрядність числа"),
    ("settings.timeLabel", "Час показу числа"),
    ("settings.timeUnit", "сек"),
    ("settings.totalExamplesLabel", "Кількість прикладів"),
    ("settings.seriesCountLabel", "Чисел у серії"),
    ("settings.range10_19Label", "Числа 10-19"),
    ("settings.round10_90Label", "Круглі десятки 10-90"),
    ("settings.round100_900Label", "Круглі сотні 100-900"),
    ("settings.languageLabel", "Мова"),
    ("settings.soundLabel", "Звук"),
    ("settings.hint", "↑↓ вибір · ←→ змінити · Enter почати · Esc назад"),
    ("settings.invalid", "Некоректні налаштування"),
    ("settings.saveFailed", "Не вдалося зберегти налаштування"),
];

const EN: Entries = &[
    ("language", "English"),
    ("game.prepare", "Get ready..."),
    ("game.watch", "Remember this number!"),
    ("game.answerPrompt", "What number did you see?"),
    ("game.seriesAnswerPrompt", "Enter all {count} numbers in order"),
    ("game.correct", "Correct! 🎉"),
    ("game.incorrect", "Incorrect"),
    ("game.correctWas", "Correct answer:"),
    ("game.progress", "Example {current} of {total}"),
    ("game.correctCount", "Correct"),
    ("game.incorrectCount", "Mistakes"),
    ("game.answerHint", "Enter submit · Tab next field · Esc quit"),
    ("game.failureHint", "a show again · Enter continue · n skip"),
    ("game.successHint", "Enter continue"),
    ("results.title", "Training Results"),
    ("results.accuracy", "Accuracy"),
    ("results.correctAnswers", "Correct Answers"),
    ("results.incorrectAnswers", "Mistakes"),
    ("results.duration", "Training Time"),
    ("results.durationFormat", "{seconds} sec"),
    ("results.excellent", "Excellent! 🌟"),
    ("results.good", "Good! 👍"),
    ("results.needPractice", "Need more practice 💪"),
    ("results.hint", "r new session · s settings · q quit"),
    ("errors.emptyAnswer", "Please enter a number"),
    ("errors.invalidAnswer", "Please enter a valid number"),
    ("errors.generic", "An error occurred"),
    ("settings.title", "Training Settings"),
    ("settings.description", "Choose parameters for number recognition training"),
    ("settings.digitsLabel", "Number of Digits"),
    ("settings.timeLabel", "Display Time"),
    ("settings.timeUnit", "sec"),
    ("settings.totalExamplesLabel", "Number of Examples"),
    ("settings.seriesCountLabel", "Numbers per Series"),
    ("settings.range10_19Label", "Numbers 10-19"),
    ("settings.round10_90Label", "Round tens 10-90"),
    ("settings.round100_900Label", "Round hundreds 100-900"),
    ("settings.languageLabel", "Language"),
    ("settings.soundLabel", "Sound"),
    ("settings.hint", "↑↓ select · ←→ change · Enter start · Esc back"),
    ("settings.invalid", "Settings are out of range"),
    ("settings.saveFailed", "Settings could not be saved"),
];

const RU: Entries = &[
    ("language", "Русский"),
    ("game.prepare", "Приготовьтесь..."),
    ("game.watch", "Запомните число!"),
    ("game.answerPrompt", "Какое число вы видели?"),
    ("game.seriesAnswerPrompt", "Введите все {count} чисел по порядку"),
    ("game.correct", "Правильно! 🎉"),
    ("game.incorrect", "Неправильно"),
    ("game.correctWas", "Правильный ответ:"),
    ("game.progress", "Пример {current} из {total}"),
    ("game.correctCount", "Правильно"),
    ("game.incorrectCount", "Ошибок"),
    ("game.answerHint", "Enter ответить · Tab следующее поле · Esc выйти"),
    ("game.failureHint", "a показать снова · Enter далее · n пропустить"),
    ("game.successHint", "Enter далее"),
    ("results.title", "Результаты тренировки"),
    ("results.accuracy", "Точность"),
    ("results.correctAnswers", "Правильных ответов"),
    ("results.incorrectAnswers", "Ошибок"),
    ("results.duration", "Время тренировки"),
    ("results.durationFormat", "{seconds} сек"),
    ("results.excellent", "Отлично! 🌟"),
    ("results.good", "Хорошо! 👍"),
    ("results.needPractice", "Нужно больше практики 💪"),
    ("results.hint", "r новая тренировка · s настройки · q выйти"),
    ("errors.emptyAnswer", "Пожалуйста, введите число"),
    ("errors.invalidAnswer", "Введите корректное число"),
    ("errors.generic", "Произошла ошибка"),
    ("settings.title", "Настройки тренировки"),
    ("settings.description", "Выберите параметры для тренировки распознавания чисел"),
    ("settings.digitsLabel", "Разрядность числа"),
    ("settings.timeLabel", "Время показа числа"),
    ("settings.timeUnit", "сек"),
    ("settings.totalExamplesLabel", "Количество примеров"),
    ("settings.seriesCountLabel", "Чисел в серии"),
    ("settings.range10_19Label", "Числа 10-19"),
    ("settings.round10_90Label", "Круглые десятки 10-90"),
    ("settings.round100_900Label", "Круглые сотни 100-900"),
    ("settings.languageLabel", "Язык"),
    ("settings.soundLabel", "Звук"),
    ("settings.hint", "↑↓ выбор · ←→ изменить · Enter начать · Esc назад"),
    ("settings.invalid", "Некорректные настройки"),
    ("settings.saveFailed", "Не удалось сохранить настройки"),
];

const ES: Entries = &[
    ("language", "Español"),
    ("game.prepare", "Prepárate..."),
    ("game.watch", "¡Recuerda este número!"),
    ("game.answerPrompt", "¿Qué número viste?"),
    ("game.seriesAnswerPrompt", "Introduce los {count} números en orden"),
    ("game.correct", "¡Correcto! 🎉"),
    ("game.incorrect", "Incorrecto"),
    ("game.correctWas", "Respuesta correcta:"),
    ("game.progress", "Ejemplo {current} de {total}"),
    ("game.correctCount", "Correctos"),
    ("game.incorrectCount", "Errores"),
    ("game.answerHint", "Enter responder · Tab siguiente campo · Esc salir"),
    ("game.failureHint", "a mostrar otra vez · Enter continuar · n saltar"),
    ("game.successHint", "Enter continuar"),
    ("results.title", "Resultados del entrenamiento"),
    ("results.accuracy", "Precisión"),
    ("results.correctAnswers", "Respuestas correctas"),
    ("results.incorrectAnswers", "Errores"),
    ("results.duration", "Tiempo de entrenamiento"),
    ("results.durationFormat", "{seconds} seg"),
    ("results.excellent", "¡Excelente! 🌟"),
    ("results.good", "¡Bien! 👍"),
    ("results.needPractice", "Necesitas más práctica 💪"),
    ("results.hint", "r nuevo entrenamiento · s configuración · q salir"),
    ("errors.emptyAnswer", "Por favor ingresa un número"),
    ("errors.invalidAnswer", "Por favor ingresa un número válido"),
    ("errors.generic", "Ocurrió un error"),
    ("settings.title", "Configuración del entrenamiento"),
    ("settings.description", "Elige los parámetros para el entrenamiento de reconocimiento de números"),
    ("settings.digitsLabel", "Número de dígitos"),
    ("settings.timeLabel", "Tiempo de visualización"),
    ("settings.timeUnit", "seg"),
    ("settings.totalExamplesLabel", "Número de ejemplos"),
    ("settings.seriesCountLabel", "Números por serie"),
    ("settings.range10_19Label", "Números 10-19"),
    ("settings.round10_90Label", "Decenas redondas 10-90"),
    ("settings.round100_900Label", "Centenas redondas 100-900"),
    ("settings.languageLabel", "Idioma"),
    ("settings.soundLabel", "Sonido"),
    ("settings.hint", "↑↓ elegir · ←→ cambiar · Enter comenzar · Esc volver"),
    ("settings.invalid", "Configuración fuera de rango"),
    ("settings.saveFailed", "No se pudo guardar la configuración"),
];

impl Language {
    pub const ALL: [Language; 4] = [Language::Ua, Language::En, Language::Ru, Language::Es];

    fn entries(&self) -> Entries {
        match self {
            Language::Ua => UA,
            Language::En => EN,
            Language::Ru => RU,
            Language::Es => ES,
        }
    }

    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        find_in(&[self.entries()], key)
    }

    /// Name of the language in itself, e.g. "Español".
    pub fn native_name(&self) -> &'static str {
        self.lookup("language").unwrap_or("?")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dictionary {
    pub language: Language,
}

impl Dictionary {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    fn resolve(&self, key: &str) -> Option<&'static str> {
        let tables: Vec<Entries> = std::iter::once(self.language)
            .chain(FALLBACK_ORDER)
            .map(|lang| lang.entries())
            .collect();
        find_in(&tables, key)
    }
}

/// First table holding `key` wins.
fn find_in(tables: &[Entries], key: &str) -> Option<&'static str> {
    tables
        .iter()
        .find_map(|entries| entries.iter().find(|(k, _)| *k == key))
        .map(|(_, v)| *v)
}

impl Localizer for Dictionary {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        let Some(template) = self.resolve(key) else {
            tracing::warn!("missing translation for {key:?}");
            return key.to_string();
        };
        params
            .iter()
            .fold(template.to_string(), |text, (name, value)| {
                text.replace(&format!("{{{name}}}"), value)
            })
    }
}
