use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::tooling::{FieldKind, ObjectSchema, Tool, ToolExecutionError, ToolResult};

const OPERATIONS: [&str; 5] = ["add", "subtract", "multiply", "divide", "power"];

#[derive(Debug, Deserialize)]
struct CalculatorArgs {
    operation: String,
    a: f64,
    b: f64,
}

/// Binary arithmetic over two numbers.
pub struct CalculatorTool {
    schema: ObjectSchema,
}

impl CalculatorTool {
    pub fn new() -> Self {
        Self {
            schema: ObjectSchema::new()
                .required(
                    "operation",
                    FieldKind::one_of(OPERATIONS),
                    "Arithmetic operation to apply",
                )
                .required("a", FieldKind::Number, "Left operand")
                .required("b", FieldKind::Number, "Right operand")
                .coerce_primitives(),
        }
    }
}

impl Default for CalculatorTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "Apply add, subtract, multiply, divide or power to two numbers a and b."
    }

    fn schema(&self) -> &ObjectSchema {
        &self.schema
    }

    async fn execute(&self, args: Map<String, Value>) -> Result<ToolResult, ToolExecutionError> {
        let args: CalculatorArgs = serde_json::from_value(Value::Object(args))
            .map_err(|err| ToolExecutionError::InvalidInput(err.to_string()))?;

        let result = match args.operation.as_str() {
            "add" => args.a + args.b,
            "subtract" => args.a - args.b,
            "multiply" => args.a * args.b,
            "divide" if args.b == 0.0 => {
                return Ok(ToolResult::failure("division by zero"));
            }
            "divide" => args.a / args.b,
            "power" => args.a.powf(args.b),
            other => {
                return Err(ToolExecutionError::InvalidInput(format!(
                    "unsupported operation '{other}'"
                )));
            }
        };

        if !result.is_finite() {
            return Ok(ToolResult::failure("result is not a finite number"));
        }
        Ok(ToolResult::ok(json!({ "result": result })))
    }
}
