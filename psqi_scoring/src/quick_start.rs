/*!

# Quick start

This example scores the answers collected with an online form and exported to Excel.

**Collecting the answers** Create a form with the questions 1 to 9 of the PSQI. Use the
question numbers as titles (`1`, `2`, ..., `5a.`, ..., `9`), and add two questions
`姓名` and `您的年龄` for the name and the age. Once the survey is closed, download the
answers in the **Excel format** (xlsx). The spreadsheet should look like this:

```text
序号  填写日期是：  姓名：  您的年龄  1     2    3    4       5a.  5b.  ...  6    7   8   9
1     2024-11-29    张三    18        23点  10分 6点  6.5小时 无   无   ...  很好 无  无  无
```

**Scoring** Run `psqi` on the file:

```bash
psqi -i responses.xlsx
```

The results are written next to the input in `psqi_results.csv`:

```text
Name,Age,C1_SleepQuality,C2_SleepLatency,C3_SleepDuration,C4_SleepEfficiency,C5_SleepDisturbances,C6_MedicationUse,C7_DaytimeDysfunction,TotalScore
张三,18,0,0,1,0,0,0,0,1
```

Use `-o stdout` to print them instead, and `--output-type json` for JSON. Add `--verbose`
to see how each answer was read.

**Using the library** The same scoring is available from Rust:

```
use psqi_scoring::builder::Builder;
use psqi_scoring::{score_response, Component, Question};

let response = Builder::new()
    .answer(Question::Q1, "23点")
    .answer(Question::Q2, "10分")
    .answer(Question::Q3, "6点")
    .answer(Question::Q4, "6.5小时")
    .answer(Question::Q5a, "无")
    .disturbances(&["无"; 9])
    .answer(Question::Q6, "很好")
    .answer(Question::Q7, "无")
    .answer(Question::Q8, "无")
    .answer(Question::Q9, "无")
    .build();

let scores = score_response(&response);
assert_eq!(scores.get(Component::SleepDuration).value(), 1);
assert_eq!(scores.total(), 1);
```

*/
