//! Line-oriented command interface over a [`DivinationSession`].

use yz_core::line::position_name;
use yz_core::{CastMethod, LineResult};

use crate::error::{SessionError, SessionResult};
use crate::phase::PhaseKind;
use crate::session::DivinationSession;

/// Parses text commands and drives a session with them.
#[derive(Debug)]
pub struct Console {
    session: DivinationSession,
}

/// Parse a line from a name or the traditional 6/7/8/9 number.
pub fn parse_line(s: &str) -> Option<LineResult> {
    match s.trim() {
        "6" => Some(LineResult::OldYin),
        "7" => Some(LineResult::YoungYang),
        "8" => Some(LineResult::YoungYin),
        "9" => Some(LineResult::OldYang),
        other => LineResult::parse(other),
    }
}

impl Console {
    /// Wrap a session.
    pub fn new(session: DivinationSession) -> Self {
        Self { session }
    }

    /// The session.
    pub fn session(&self) -> &DivinationSession {
        &self.session
    }

    /// The session, mutably.
    pub fn session_mut(&mut self) -> &mut DivinationSession {
        &mut self.session
    }

    /// Process one line of input and return the text to show.
    pub fn process(&mut self, input: &str) -> SessionResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "question" | "q" => self.do_question(rest),
            "method" => self.do_method(rest),
            "toss" => self.do_toss(rest),
            "line" => self.do_line(rest),
            "number" | "n" => self.do_number(rest),
            "reset" => self.do_reset(),
            "result" => self.do_result(),
            "follow" => self.do_follow(),
            "ask" => self.do_ask(rest),
            "back" => self.do_back(),
            "restart" => self.do_restart(),
            "status" => Ok(self.do_status()),
            "snapshot" => self.session.snapshot().to_json(),
            "recommend" => Ok(self.do_recommend()),
            "note" => self.do_note(rest),
            "journal" => Ok(self.session.journal().export_text()),
            "export" => self.do_export(rest),
            "help" | "?" => Ok(help_text().to_string()),
            "quit" | "exit" => Ok("再会。".to_string()),
            _ => Err(SessionError::UnknownCommand(cmd)),
        }
    }

    fn do_question(&mut self, rest: &str) -> SessionResult<String> {
        self.session.enter_question(rest)?;
        if rest.is_empty() {
            Ok("问题已清空".to_string())
        } else {
            Ok(format!("问题：{rest}"))
        }
    }

    fn do_method(&mut self, rest: &str) -> SessionResult<String> {
        let method = CastMethod::parse(rest).ok_or_else(|| {
            SessionError::InvalidInput(format!("unknown method '{rest}', use: coins, number"))
        })?;
        self.session.select_method(method)?;
        Ok(match method {
            CastMethod::ManualCoins => "手动摇卦：输入 toss 摇六次，或 line <爻> 手动记录".to_string(),
            CastMethod::NumberInput => "数字起卦：输入 number <正整数>".to_string(),
        })
    }

    fn do_toss(&mut self, rest: &str) -> SessionResult<String> {
        let all = match rest.to_lowercase().as_str() {
            "" => false,
            "all" => true,
            other => {
                return Err(SessionError::InvalidInput(format!(
                    "unknown toss option '{other}', use: toss, toss all"
                )));
            }
        };

        let mut out = String::new();
        loop {
            let toss = self.session.toss()?;
            let faces: String = toss.coins.iter().map(ToString::to_string).collect();
            out.push_str(&format!(
                "{}: {faces} → {}\n",
                position_name(toss.index),
                toss.line()
            ));
            if !all || self.session.phase_kind() != PhaseKind::Casting {
                break;
            }
        }
        self.append_result(&mut out);
        Ok(out.trim_end().to_string())
    }

    fn do_line(&mut self, rest: &str) -> SessionResult<String> {
        let line = parse_line(rest).ok_or_else(|| {
            SessionError::InvalidInput(format!(
                "unknown line '{rest}', use: 老阳/少阳/少阴/老阴 or 9/7/8/6"
            ))
        })?;
        let index = self.session.line_results().len();
        self.session.record_line(line)?;
        let mut out = format!("{}: {line}\n", position_name(index));
        self.append_result(&mut out);
        Ok(out.trim_end().to_string())
    }

    fn do_number(&mut self, rest: &str) -> SessionResult<String> {
        let n: u64 = rest.parse().map_err(|_| {
            SessionError::InvalidInput(format!("'{rest}' is not a positive whole number"))
        })?;
        self.session.submit_number(n)?;
        let mut out = String::new();
        self.append_result(&mut out);
        Ok(out.trim_end().to_string())
    }

    fn do_reset(&mut self) -> SessionResult<String> {
        let discarded = self.session.line_results().len();
        self.session.reset_cast()?;
        Ok(format!("已重新起卦，舍弃 {discarded} 爻"))
    }

    fn do_result(&self) -> SessionResult<String> {
        let mut out = String::new();
        self.append_result(&mut out);
        if out.is_empty() {
            return Err(SessionError::InvalidTransition {
                phase: self.session.phase_kind(),
                event: "show a result",
            });
        }
        Ok(out.trim_end().to_string())
    }

    fn append_result(&self, out: &mut String) {
        let Some(reading) = self.session.reading() else {
            return;
        };
        let hexagram = reading.hexagram();
        out.push_str(&format!("\n本卦：{hexagram}\n"));
        out.push_str(&format!("卦辞：{}\n", hexagram.judgment_text));
        out.push_str(&format!("象曰：{}\n", hexagram.image_text));
        if let Some(t) = reading.transformed_hexagram() {
            out.push_str(&format!("变卦：{t}\n"));
        }
        out.push_str(&format!("断法：{}\n", reading.guide));

        if let Some(enrichment) = self.session.enrichment_content() {
            out.push('\n');
            for section in &enrichment.sections {
                out.push_str(&format!(
                    "【{}】{}\n",
                    section.aspect.label(),
                    section.text
                ));
            }
            out.push_str(&format!("\n{}\n", enrichment.conclusion));
        }
    }

    fn do_follow(&mut self) -> SessionResult<String> {
        self.session.open_follow_up()?;
        let mut out = "请输入 ask <问题> 追问，back 返回结果。\n推荐问题：\n".to_string();
        for q in self.session.recommended_questions() {
            out.push_str(&format!("  - {q}\n"));
        }
        Ok(out.trim_end().to_string())
    }

    fn do_ask(&mut self, rest: &str) -> SessionResult<String> {
        let answer = self.session.ask(rest)?;
        let mut out = answer.to_string();
        if !answer.follow_ups.is_empty() {
            out.push_str("\n\n可以继续问：");
            for q in &answer.follow_ups {
                out.push_str(&format!("\n  - {q}"));
            }
        }
        Ok(out)
    }

    fn do_back(&mut self) -> SessionResult<String> {
        self.session.back()?;
        Ok("已返回结果".to_string())
    }

    fn do_restart(&mut self) -> SessionResult<String> {
        self.session.restart();
        Ok("已重新开始".to_string())
    }

    fn do_status(&self) -> String {
        let s = &self.session;
        let mut out = format!("阶段: {}\n", s.phase_kind());
        if !s.question_text().is_empty() {
            out.push_str(&format!("问题: {}\n", s.question_text()));
        }
        if let Some(method) = s.cast_method() {
            out.push_str(&format!("起卦方式: {method}\n"));
        }
        if s.phase_kind() == PhaseKind::Casting && s.cast_method() == Some(CastMethod::ManualCoins)
        {
            let lines: Vec<String> = s.line_results().iter().map(ToString::to_string).collect();
            out.push_str(&format!("已起 {}/6 爻: {}\n", lines.len(), lines.join(" ")));
        }
        if let Some(h) = s.resolved_hexagram() {
            out.push_str(&format!("本卦: {h}\n"));
        }
        if s.is_generating() {
            out.push_str("正在生成解读…\n");
        }
        out.push_str(&format!("日志条目: {}", s.journal().len()));
        out
    }

    fn do_recommend(&self) -> String {
        let questions = self.session.recommended_questions();
        if questions.is_empty() {
            return "起卦之后才有推荐问题".to_string();
        }
        questions
            .iter()
            .map(|q| format!("- {q}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn do_note(&mut self, rest: &str) -> SessionResult<String> {
        if rest.is_empty() {
            return Err(SessionError::InvalidInput("usage: note <text>".to_string()));
        }
        self.session.note(rest);
        Ok("已记录".to_string())
    }

    fn do_export(&self, format: &str) -> SessionResult<String> {
        match format.to_lowercase().as_str() {
            "markdown" | "md" | "" => Ok(self.session.journal().export_markdown()),
            "text" | "txt" => Ok(self.session.journal().export_text()),
            other => Err(SessionError::InvalidInput(format!(
                "unknown format '{other}', use: markdown, text"
            ))),
        }
    }
}

fn help_text() -> &'static str {
    "\
命令:
  question <问题>        输入或修改问题
  method <coins|number>  选择起卦方式
  toss [all]             摇一次（或摇完六爻）
  line <爻>              手动记录一爻 (老阳/少阳/少阴/老阴 或 9/7/8/6)
  number <n>             数字起卦
  reset                  舍弃已起的爻
  result                 查看卦象与解读
  follow                 进入追问
  ask <问题>             追问
  back                   返回结果
  restart                重新开始
  status                 当前状态
  snapshot               会话快照 (JSON)
  recommend              推荐问题
  note <text>            添加备注
  journal                查看日志
  export [markdown|text] 导出日志
  quit                   退出"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use chrono::NaiveDate;

    fn console() -> Console {
        let config =
            SessionConfig::default().with_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        Console::new(DivinationSession::offline(config))
    }

    #[test]
    fn empty_input_is_ignored() {
        let mut c = console();
        assert_eq!(c.process("   ").unwrap(), "");
    }

    #[test]
    fn unknown_command() {
        let mut c = console();
        assert!(matches!(
            c.process("dance"),
            Err(SessionError::UnknownCommand(cmd)) if cmd == "dance"
        ));
    }

    #[test]
    fn traditional_line_numbers() {
        assert_eq!(parse_line("9"), Some(LineResult::OldYang));
        assert_eq!(parse_line("6"), Some(LineResult::OldYin));
        assert_eq!(parse_line("少阴"), Some(LineResult::YoungYin));
        assert_eq!(parse_line("young yang"), Some(LineResult::YoungYang));
        assert_eq!(parse_line("5"), None);
    }

    #[test]
    fn coin_flow_to_result() {
        let mut c = console();
        c.process("question 我今年的事业运势如何？").unwrap();
        c.process("method coins").unwrap();
        let first = c.process("toss").unwrap();
        assert!(first.starts_with("初爻: "));
        let rest = c.process("toss all").unwrap();
        assert!(rest.contains("上爻: "));
        assert!(rest.contains("本卦："));
        assert!(rest.contains("【事业"));
        assert_eq!(c.session().phase_kind(), PhaseKind::Ready);
        assert!(c.process("result").unwrap().contains("断法："));
    }

    #[test]
    fn method_needs_question() {
        let mut c = console();
        assert!(matches!(
            c.process("method number"),
            Err(SessionError::InvalidTransition { .. })
        ));
        c.process("question").unwrap();
        assert!(matches!(
            c.process("method number"),
            Err(SessionError::EmptyQuestion)
        ));
        c.process("question 问财运").unwrap();
        assert!(c.process("method dice").is_err());
    }

    #[test]
    fn number_flow_and_follow_up() {
        let mut c = console();
        c.process("question 问财运").unwrap();
        c.process("method number").unwrap();
        assert!(c.process("number abc").is_err());
        assert!(c.process("number 0").is_err());
        let out = c.process("number 1").unwrap();
        assert!(out.contains("乾"));

        let follow = c.process("follow").unwrap();
        assert!(follow.contains("推荐问题"));
        let answer = c.process("ask 五行生克怎么看？").unwrap();
        assert!(answer.contains("**最终答案：**"));
        c.process("back").unwrap();
        assert_eq!(c.session().phase_kind(), PhaseKind::Ready);
    }

    #[test]
    fn manual_lines_and_reset() {
        let mut c = console();
        c.process("question 问出行").unwrap();
        c.process("method coins").unwrap();
        assert_eq!(c.process("line 9").unwrap(), "初爻: 老阳");
        assert!(c.process("line x").is_err());
        assert_eq!(c.process("reset").unwrap(), "已重新起卦，舍弃 1 爻");
        assert!(c.session().line_results().is_empty());
        assert!(c.process("number 5").is_err());
    }

    #[test]
    fn status_and_snapshot() {
        let mut c = console();
        c.process("question 问出行").unwrap();
        c.process("method coins").unwrap();
        c.process("toss").unwrap();
        let status = c.process("status").unwrap();
        assert!(status.contains("阶段: CASTING"));
        assert!(status.contains("已起 1/6 爻"));
        let snap = c.process("snapshot").unwrap();
        assert!(snap.contains("\"phase\": \"CASTING\""));
    }

    #[test]
    fn restart_and_export() {
        let mut c = console();
        c.process("question 问出行").unwrap();
        c.process("note 心里有点忐忑").unwrap();
        assert!(c.process("note").is_err());
        c.process("restart").unwrap();
        assert_eq!(c.session().phase_kind(), PhaseKind::Idle);
        let md = c.process("export").unwrap();
        assert!(md.contains("# 占卜日志"));
        assert!(md.contains("> 心里有点忐忑"));
        let txt = c.process("export text").unwrap();
        assert!(txt.contains("--- 重新开始 ---"));
        assert!(c.process("export pdf").is_err());
    }

    #[test]
    fn recommend_before_cast() {
        let mut c = console();
        assert_eq!(c.process("recommend").unwrap(), "起卦之后才有推荐问题");
        assert!(c.process("help").unwrap().contains("question <问题>"));
        assert!(c.process("result").is_err());
    }
}
