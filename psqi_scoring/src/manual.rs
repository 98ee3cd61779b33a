/*!

This is the long-form manual for `psqi_scoring` and the `psqi` command line tool.

## Input formats

The following formats are supported by `psqi`:
* `xlsx` Excel workbook (default)
* `csv` Comma Separated Values, UTF-8 (with or without BOM)

In both cases, the first row holds the names of the columns and every following row
holds the answers of one respondent.

### Column names

The columns are found from their names. The names are trimmed, lowercased and stripped of
a trailing `.`, `:` (ASCII or fullwidth) before being compared, so that `5a.`, `5A` and
`q5a` all point to question 5a.

| Column | Question |
|--------|----------|
| `1` | usual bed time (`23点`, `22点30分`, `23:15`) |
| `2` | minutes needed to fall asleep (`10分`) |
| `3` | usual getting up time |
| `4` | hours of actual sleep (`6.5小时`) |
| `5a` to `5j` | frequency of the sleep troubles (`无`, `<1次/周`, `1-2次/周`, `>=3次/周`) |
| `6` | overall sleep quality (`很好`, `较好`, `较差`, `很差`) |
| `7` | frequency of sleeping medication |
| `8` | frequency of trouble staying awake |
| `9` | problem keeping up enthusiasm (`无`, `偶尔`, `有时`, `经常`) |
| `姓名` / `name` | name of the respondent, copied to the output |
| `您的年龄` / `年龄` / `age` | age of the respondent, copied to the output |

All the other columns are ignored. Other names can be used through the `columns` entry
of the configuration file.

## Scoring

Each component is scored between 0 (no difficulty) and 3 (severe difficulty).

| Component | Answers | Rule |
|-----------|---------|------|
| C1 sleep quality | 6 | `很好` 0, `较好` 1, `较差` 2, `很差` 3 |
| C2 sleep latency | 2, 5a | minutes (≤15: 0, ≤30: 1, ≤60: 2, else 3) + frequency of 5a, then 0: 0, 1-2: 1, 3-4: 2, 5-6: 3 |
| C3 sleep duration | 4 | >7h: 0, ≥6h: 1, ≥5h: 2, else 3 |
| C4 sleep efficiency | 1, 3, 4 | hours asleep / hours in bed: ≥85%: 0, ≥75%: 1, ≥65%: 2, else 3 |
| C5 sleep disturbances | 5b to 5j | sum of the frequencies, then 0: 0, 1-9: 1, 10-18: 2, 19-27: 3 |
| C6 medication | 7 | the frequency |
| C7 daytime dysfunction | 8, 9 | frequency of 8 + grade of 9, then 0: 0, 1-2: 1, 3-4: 2, 5-6: 3 |

The global score is the sum of the components, between 0 and 21.

### Frequencies

| Score | Accepted answers |
|-------|------------------|
| 0 | `无`, `none`, empty |
| 1 | `<1`, `＜1`, `less than once` |
| 2 | `1-2`, `1–2` |
| 3 | `>=3`, `>或=3`, `≥3`, `3 or more` |

The answers are lowercased and the slashes are removed before matching. Any other answer
counts as 0.

### Missing and unreadable answers

Answers are never rejected. A missing answer and an answer that cannot be read are
treated in the same way:
* frequencies, grades and minutes count as 0
* the hours of sleep count as 0, which gives 3 for C3 and C4
* times count as midnight

For C4, the getting up time is read as the next day when it is at or before the bed
time. If both times are equal, the respondent is counted as having spent 24 hours in bed.

## Output formats

* `csv` (default): UTF-8 with BOM, so that Excel opens it with the right encoding
* `json`: an array of objects

Both contain the columns `Name`, `Age`, `C1_SleepQuality` to `C7_DaytimeDysfunction` and
`TotalScore`.

## Ordering the results

By default, the results are in the order of the input rows. A list of names can be given
(`--name-order` or `nameOrder` in the configuration) to reorder them. The names are
compared through their pinyin transliteration, so that `张三` in the list matches `张三`
in the spreadsheet even if it was typed with a different variant of a character that has
the same reading. Respondents not in the list come last.

## Configuration file

```json
{
  "inputSettings": {
    "filePath": "responses.xlsx",
    "provider": "xlsx",
    "excelWorksheetName": "Sheet1"
  },
  "outputSettings": {
    "outputPath": "psqi_results.csv",
    "format": "csv"
  },
  "columns": {
    "name": "姓名：",
    "q5a": "5a. 入睡困难"
  },
  "nameOrder": ["张三", "李四"]
}
```

All the entries are optional. The paths are relative to the configuration file. The
command line flags take precedence over the configuration file.

*/
