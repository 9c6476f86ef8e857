//! Prompt construction for outline planning.
//!
//! Pure string assembly: the system prompt describes the JSON schema, the
//! slide budget and the layout vocabulary; the user prompt carries the
//! input text.

use std::fmt::Write as _;

use crate::config::DeckConfig;

/// JSON shape the model must return, included verbatim in the system prompt.
const SCHEMA_REFERENCE: &str = r#"{
  "title": "整体演示标题",
  "slides": [
    {
      "id": "01",
      "type": "title",
      "title": "主标题",
      "subtitle": "副标题（可选）",
      "content": "",
      "layout": "title"
    },
    {
      "id": "02",
      "type": "content",
      "title": "页面标题",
      "content": "页面主要内容",
      "layout": "text_heavy"
    }
  ]
}"#;

/// Build the system prompt for the configured budgets and layouts.
pub fn build_system_prompt(config: &DeckConfig) -> String {
    let planner = &config.planner;
    let mut prompt = String::new();

    prompt.push_str(
        "你是一个专业的幻灯片规划专家。你的任务是将用户提供的文本内容规划为结构化的幻灯片演示。\n\n",
    );

    prompt.push_str("## 规划规则：\n");
    let _ = writeln!(prompt, "1. 总页数不超过{}页", planner.max_slides);
    let _ = writeln!(prompt, "2. 每页内容控制在{}字左右", planner.words_per_slide);
    prompt.push_str("3. 必须包含标题页和总结页\n");
    prompt.push_str("4. 逻辑清晰，层次分明\n\n");

    prompt.push_str("## 可用的布局类型：\n");
    for layout in &planner.slide_types {
        let _ = writeln!(prompt, "- {}: {}", layout, layout.describe());
    }
    prompt.push('\n');

    prompt.push_str("## 输出格式要求：\n");
    prompt.push_str("请只返回标准的JSON格式（不要附加任何解释），包含以下结构：\n");
    prompt.push_str(SCHEMA_REFERENCE);
    prompt.push_str("\n\n");

    prompt.push_str("注意：\n");
    prompt.push_str("- 每页都必须有唯一的id（01, 02, 03...）\n");
    prompt.push_str("- title页面的content字段可以为空\n");
    prompt.push_str("- content字段支持HTML标签\n");
    prompt.push_str("- 根据内容特点合理选择layout类型");

    prompt
}

/// Build the user prompt wrapping the input text.
pub fn build_user_prompt(input: &str) -> String {
    format!(
        "请为以下文本内容规划幻灯片演示：\n\n{input}\n\n\
         请分析内容结构，提取核心要点，规划合适的页面数量和布局，生成JSON格式的幻灯片规划。"
    )
}
