//! Static reference texts and fixed user-facing strings.
//!
//! All texts are pre-written, immutable and loaded into the binary.
//! Light HTML markup is used because the transport renders messages
//! with HTML parse mode when formatting is requested.

pub const START_TEXT: &str = "\
🎲 Привет! Я помощник по D&D для новичков.\n\
\n\
Я помогу разобраться с правилами, кубиками, боем и созданием персонажа.\n\
Открой раздел командой или просто задай вопрос свободным текстом.\n\
\n\
Команда /help покажет список разделов.";

pub const HELP_TEXT: &str = "\
<b>Разделы справочника:</b>\n\
\n\
/rules — основные правила D&D\n\
/dice — всё о бросках кубиков\n\
/combat — правила боя для новичков\n\
/stats — объяснение характеристик\n\
/glossary — словарь терминов D&D\n\
/races — список доступных рас\n\
/classes — список классов персонажей\n\
/spells — базовая информация о заклинаниях\n\
\n\
Можно не только читать разделы, но и задавать вопросы своими словами — \
я отвечу с учётом открытого раздела.";

pub const RULES_TEXT: &str = "\
<b>📖 Основные правила D&D</b>\n\
\n\
D&D — это совместное повествование: Мастер (DM) описывает мир, \
игроки описывают действия своих персонажей, а кубики решают спорные моменты.\n\
\n\
Базовый цикл игры:\n\
1. Мастер описывает ситуацию.\n\
2. Игрок говорит, что делает персонаж.\n\
3. Если исход не очевиден, бросается d20, к результату добавляется \
модификатор, и сумма сравнивается со Сложностью (DC).\n\
\n\
Проверка успешна, если результат больше или равен DC. \
Например: взлом замка — Ловкость (DC 15), убеждение стражника — Харизма (DC 12).\n\
\n\
Главное правило: правила служат истории, а не наоборот. \
Если сомневаешься — спроси Мастера.";

pub const DICE_RULES_TEXT: &str = "\
<b>🎲 Броски кубиков</b>\n\
\n\
В D&D используется набор кубиков: d4, d6, d8, d10, d12, d20 и d100. \
Число после «d» — количество граней.\n\
\n\
Запись <b>2d6+3</b> означает: брось два шестигранных кубика и прибавь 3.\n\
\n\
Основные броски:\n\
• <b>Проверка характеристики</b> — d20 + модификатор против DC.\n\
• <b>Бросок атаки</b> — d20 + модификатор против Класса Доспеха (AC).\n\
• <b>Спасбросок</b> — d20 + модификатор, чтобы избежать опасности.\n\
\n\
<b>Преимущество</b>: брось два d20 и возьми больший результат.\n\
<b>Помеха</b>: брось два d20 и возьми меньший.\n\
\n\
Чистая 20 на броске атаки — критическое попадание: кубики урона удваиваются. \
Чистая 1 — автоматический промах.";

pub const COMBAT_RULES_TEXT: &str = "\
<b>⚔️ Бой для новичков</b>\n\
\n\
Бой идёт по раундам; раунд — около 6 секунд игрового времени.\n\
\n\
<b>1. Инициатива.</b> В начале боя каждый бросает d20 + модификатор Ловкости. \
Ходы идут по убыванию результата.\n\
\n\
<b>2. Твой ход.</b> На своём ходу ты можешь:\n\
• переместиться на свою скорость (обычно 30 футов);\n\
• совершить одно действие: Атака, Рывок, Отход, Уклонение, Помощь, \
Засада, Поиск или заклинание;\n\
• совершить бонусное действие, если что-то его даёт.\n\
\n\
<b>3. Атака.</b> Брось d20 + модификатор атаки. Если результат ≥ AC цели — \
попадание, бросай урон.\n\
\n\
<b>4. Урон и хиты.</b> Урон вычитается из хитов (HP). На 0 HP персонаж \
падает без сознания и начинает делать спасброски от смерти: \
три успеха — стабилизация, три провала — гибель.\n\
\n\
Совет: не забывай про укрытия и положение на поле — фланги и высота \
часто решают бой не хуже кубиков.";

pub const STATS_TEXT: &str = "\
<b>💪 Характеристики персонажа</b>\n\
\n\
Шесть характеристик описывают персонажа. Значение 10–11 — средний \
человек; модификатор = (значение − 10) / 2, округление вниз.\n\
\n\
• <b>Сила (STR)</b> — рукопашные атаки, переноска грузов, атлетика.\n\
• <b>Ловкость (DEX)</b> — AC, инициатива, скрытность, стрельба.\n\
• <b>Телосложение (CON)</b> — хиты и стойкость к яду и усталости.\n\
• <b>Интеллект (INT)</b> — знания, расследование, магия волшебника.\n\
• <b>Мудрость (WIS)</b> — внимательность, интуиция, магия жреца и друида.\n\
• <b>Харизма (CHA)</b> — убеждение, обман, магия барда, колдуна и чародея.\n\
\n\
Пример: Сила 16 даёт модификатор +3 — он добавляется к броскам атаки \
мечом и к урону.\n\
\n\
<b>Бонус мастерства</b> (+2 на 1-м уровне) добавляется к проверкам, \
в которых персонаж обучен.";

pub const GLOSSARY_TEXT: &str = "\
<b>📚 Словарь терминов</b>\n\
\n\
• <b>DM (Мастер)</b> — ведущий игры, описывает мир и управляет НИП.\n\
• <b>DC (Сложность)</b> — число, которое нужно выбросить для успеха.\n\
• <b>AC (Класс Доспеха)</b> — насколько сложно попасть по существу.\n\
• <b>HP (Хиты)</b> — запас здоровья.\n\
• <b>НИП (NPC)</b> — персонаж под управлением Мастера.\n\
• <b>Спасбросок</b> — бросок, чтобы избежать или ослабить эффект.\n\
• <b>Преимущество/Помеха</b> — бросок двух d20 с выбором большего/меньшего.\n\
• <b>Короткий отдых</b> — час передышки, можно потратить кости хитов.\n\
• <b>Длинный отдых</b> — 8 часов, восстанавливает хиты и ячейки заклинаний.\n\
• <b>Ячейка заклинания</b> — ресурс, расходуемый на применение заклинания.";

pub const RACES_INTRO_TEXT: &str = "\
<b>🧝 Расы</b>\n\
\n\
Раса определяет происхождение персонажа: бонусы характеристик, \
скорость, особые умения.\n\
\n\
Задай вопрос о любой расе свободным текстом — например, \
«чем хороши полурослики?» — и я отвечу по справочнику.";

pub const SPELLS_INTRO_TEXT: &str = "\
<b>✨ Заклинания</b>\n\
\n\
Заклинания имеют уровень (0–9), время накладывания, дистанцию и \
компоненты. Заговоры (0-й уровень) не тратят ячейки.\n\
\n\
Спроси о конкретном заклинании свободным текстом — например, \
«как работает огненный шар?».";

pub const CLASSES_INTRO_TEXT: &str = "\
<b>🛡 Классы</b>\n\
\n\
Класс определяет роль персонажа: боец, заклинатель, поддержка. \
Он задаёт кость хитов, владения и ключевые умения.\n\
\n\
Спроси о любом классе свободным текстом — например, \
«что умеет плут на первом уровне?».";

/// Fixed behavioral instruction block embedded in every prompt.
///
/// Identical for grounded and plain templates: answer only if the
/// question is relevant to the context, otherwise point to one of the
/// named sections, and use concrete D&D examples where helpful.
pub const PROMPT_INSTRUCTIONS: &str = "\
ИНСТРУКЦИИ:\n\
1. Если вопрос пользователя относится к содержимому этого раздела - ответь на него кратко, понятно и дружелюбно на русском.\n\
2. Если вопрос НЕ об этом разделе - предложи открыть соответствующий раздел (укажи его название) НАЗВАНИЯ РАЗДЕЛОВ(/races — список доступных рас,\n\
\t/classes — список классов персонажей,\n\
    /rules — основные правила D&D,\n\
\t/dice — всё о бросках кубиков,\n\
\t/combat — правила боя для новичков,\n\
\t/spells — базовая информация о заклинаниях,\n\
\t/glossary — словарь терминов D&D,\n\
    /stats — объяснение характеристик).\n\
3. Всегда приводи примеры из D&D когда это уместно.";

/// Manufactured by the generation client when the endpoint is unreachable.
pub const GENERATION_UNREACHABLE_TEXT: &str =
    "❌ Ошибка подключения к Ollama. Убедись, что сервис запущен.";

/// Prefix for other generation failures; the raw detail is appended.
pub const GENERATION_ERROR_PREFIX: &str = "❌ Ошибка:";

/// Rendered by the dispatcher when the endpoint answered with a
/// non-success status and no text.
pub const NO_RESPONSE_TEXT: &str =
    "⚠️ Не удалось получить ответ. Проверь соединение с Ollama.";

/// Last-resort apology when even the plain delivery retry fails.
pub const DELIVERY_APOLOGY_TEXT: &str =
    "😔 Не получилось отправить ответ. Попробуй задать вопрос ещё раз.";
