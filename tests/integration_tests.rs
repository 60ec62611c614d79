use std::collections::HashMap;

use script_debugger::debugger::{Breakpoints, CallStack, ContextRef, ExecutionContext, Memory};
use script_debugger::parser::{discover_functions, read_name, read_value, Command, Grammar};
use script_debugger::DebugError;

// Helper to turn an embedded script into the line sequence discovery takes
fn script_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

fn discover(text: &str) -> (HashMap<String, ContextRef>, ContextRef) {
    let grammar = Grammar::new();
    let mut functions = HashMap::new();
    let root = discover_functions(&grammar, &script_lines(text), 0, &mut functions)
        .expect("discovery should succeed");
    (functions, root)
}

#[cfg(test)]
mod grammar_tests {
    use super::*;

    #[test]
    fn test_longest_name_wins() {
        let grammar = Grammar::new();

        let (cmd, args) = grammar.parse("print trace").expect("should parse");
        assert_eq!(cmd, Command::PrintTrace);
        assert!(args.is_empty(), "multi-word name should leave no args");

        let (cmd, args) = grammar.parse("print a").expect("should parse");
        assert_eq!(cmd, Command::Print);
        assert_eq!(args, vec!["a".to_string()]);

        let (cmd, _) = grammar.parse("step over").expect("should parse");
        assert_eq!(cmd, Command::StepOver);

        let (cmd, _) = grammar.parse("step").expect("should parse");
        assert_eq!(cmd, Command::Step);

        let (cmd, _) = grammar.parse("end set code").expect("should parse");
        assert_eq!(cmd, Command::EndSetCode);

        let (cmd, _) = grammar.parse("set code").expect("should parse");
        assert_eq!(cmd, Command::SetCode);
    }

    #[test]
    fn test_argument_tail_is_word_split() {
        let grammar = Grammar::new();

        let (cmd, args) = grammar.parse("set a 5").expect("should parse");
        assert_eq!(cmd, Command::Set);
        assert_eq!(args, vec!["a".to_string(), "5".to_string()]);

        let (cmd, args) = grammar.parse("add break 12").expect("should parse");
        assert_eq!(cmd, Command::AddBreak);
        assert_eq!(args, vec!["12".to_string()]);
    }

    #[test]
    fn test_unrecognized_command() {
        let grammar = Grammar::new();

        assert_eq!(
            grammar.parse("bogus 1"),
            Err(DebugError::UnknownCommand("bogus 1".to_string()))
        );
        assert!(grammar.parse("").is_err(), "empty line is not a command");
    }

    #[test]
    fn test_read_name_validation() {
        assert_eq!(read_name(Some(&"abc".to_string())), Ok("abc".to_string()));
        assert_eq!(
            read_name(Some(&"a1".to_string())),
            Err(DebugError::InvalidName("a1".to_string()))
        );
        assert_eq!(read_name(None), Err(DebugError::MissingArgument("name")));
    }

    #[test]
    fn test_read_value_validation() {
        assert_eq!(read_value(Some(&"42".to_string())), Ok(42));
        assert_eq!(
            read_value(Some(&"0".to_string())),
            Err(DebugError::InvalidValue("0".to_string()))
        );
        assert_eq!(
            read_value(Some(&"-3".to_string())),
            Err(DebugError::InvalidValue("-3".to_string()))
        );
        assert_eq!(
            read_value(Some(&"x".to_string())),
            Err(DebugError::InvalidValue("x".to_string()))
        );
        assert_eq!(read_value(None), Err(DebugError::MissingArgument("value")));
    }
}

#[cfg(test)]
mod discovery_tests {
    use super::*;

    #[test]
    fn test_function_extraction() {
        let (functions, root) =
            discover("set a 9\ndef f\n    sub a 2\n    print a\nset b 1");

        assert_eq!(functions.len(), 1, "should have found one function");
        let f = functions.get("f").expect("f should be registered");
        assert_eq!(f.borrow().len(), 2, "body should hold two lines");
        assert_eq!(
            f.borrow().current_line(),
            Some("sub a 2"),
            "one indentation unit should be stripped"
        );
        assert_eq!(f.borrow().absolute_position(), 2, "body starts after the header");

        // The root keeps every raw line so positions stay script indices.
        assert_eq!(root.borrow().name(), "main");
        assert_eq!(root.borrow().len(), 5);
        assert_eq!(root.borrow().current_line(), Some("set a 9"));
    }

    #[test]
    fn test_deeper_indentation_preserved() {
        let (functions, _) = discover("def f\n        print a");

        let f = functions.get("f").expect("f should be registered");
        assert_eq!(
            f.borrow().current_line(),
            Some("    print a"),
            "only one indentation unit is stripped"
        );
    }

    #[test]
    fn test_body_closed_by_unindented_line() {
        let (functions, _) = discover("def f\n    sub a 2\ndef g\n    sub b 3");

        assert_eq!(functions.len(), 2);
        assert_eq!(functions["f"].borrow().len(), 1);
        let g = &functions["g"];
        assert_eq!(g.borrow().len(), 1);
        assert_eq!(g.borrow().absolute_position(), 3);
    }

    #[test]
    fn test_duplicate_definition_fails_and_keeps_first() {
        let grammar = Grammar::new();
        let mut functions = HashMap::new();
        let lines = script_lines("def f\n    set x 1\ndef f\n    set x 2");

        let result = discover_functions(&grammar, &lines, 0, &mut functions);
        assert_eq!(
            result.err(),
            Some(DebugError::FunctionAlreadyDefined("f".to_string()))
        );

        // Registration happens as the scan goes; the first body survives.
        assert_eq!(functions.len(), 1);
        assert_eq!(functions["f"].borrow().current_line(), Some("set x 1"));
    }
}

#[cfg(test)]
mod memory_tests {
    use super::*;

    #[test]
    fn test_set_and_subtract() {
        let mut memory = Memory::new();

        memory.set_variable("a", 9, 0);
        assert_eq!(memory.value_of("a"), Ok(9));

        memory.subtract_variable("a", 3, 7).expect("sub should succeed");
        assert_eq!(memory.value_of("a"), Ok(6));
        assert_eq!(memory.variables_sorted(), vec![("a".to_string(), 6, 7)]);
    }

    #[test]
    fn test_subtract_unset_fails_without_mutation() {
        let mut memory = Memory::new();

        assert_eq!(
            memory.subtract_variable("q", 1, 0),
            Err(DebugError::VariableNotInMemory("q".to_string()))
        );
        assert_eq!(memory.variable_count(), 0, "failed sub must not create state");
    }

    #[test]
    fn test_remove_variable() {
        let mut memory = Memory::new();

        memory.set_variable("a", 5, 0);
        memory.remove_variable("a").expect("rem should succeed");
        assert_eq!(
            memory.value_of("a"),
            Err(DebugError::VariableNotInMemory("a".to_string()))
        );
        assert_eq!(
            memory.remove_variable("a"),
            Err(DebugError::VariableNotInMemory("a".to_string()))
        );
    }

    #[test]
    fn test_undefined_function_lookup() {
        let memory = Memory::new();
        assert_eq!(
            memory.function("f").err(),
            Some(DebugError::FunctionNotDefined("f".to_string()))
        );
    }
}

#[cfg(test)]
mod breakpoint_tests {
    use super::*;

    #[test]
    fn test_add_and_contains() {
        let mut breakpoints = Breakpoints::new();

        breakpoints.add(5);
        breakpoints.add(10);
        assert!(breakpoints.contains(5));
        assert!(breakpoints.contains(10));
        assert!(!breakpoints.contains(7));
    }

    #[test]
    fn test_adding_twice_is_idempotent() {
        let mut breakpoints = Breakpoints::new();

        breakpoints.add(5);
        breakpoints.add(5);
        assert_eq!(breakpoints.len(), 1);
    }
}

#[cfg(test)]
mod context_tests {
    use super::*;

    #[test]
    fn test_position_arithmetic() {
        let mut ctx =
            ExecutionContext::new("f", vec!["sub a 2".to_string(), "print a".to_string()], 5);

        assert_eq!(ctx.absolute_position(), 5);
        assert_eq!(ctx.current_line(), Some("sub a 2"));
        assert_eq!(ctx.peek_next(), Some("print a"));

        ctx.advance();
        assert_eq!(ctx.absolute_position(), 6);
        assert!(!ctx.end_reached());

        ctx.advance();
        assert!(ctx.end_reached());
        assert_eq!(ctx.current_line(), None);

        ctx.rewind();
        assert_eq!(ctx.absolute_position(), 5);
    }

    #[test]
    fn test_call_stack_order() {
        let mut stack = CallStack::new();
        assert!(stack.is_empty());

        let main = ExecutionContext::shared("main", Vec::new(), 0);
        let f = ExecutionContext::shared("f", Vec::new(), 3);
        stack.push(main);
        stack.push(f.clone());

        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.top().expect("non-empty").borrow().name(), "f");

        let popped = stack.pop().expect("non-empty");
        assert_eq!(popped.borrow().name(), "f");
        assert_eq!(stack.depth(), 1);
    }
}
